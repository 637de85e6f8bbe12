use libtest_mimic::{Arguments, Trial};
use std::env;

mod operations;
mod utils;

pub use utils::*;

fn main() {
    let args = Arguments::from_args();

    if env::var(SKIP_ENV).is_ok() {
        eprintln!("{SKIP_ENV} is set, skipping behavior tests");
        return;
    }

    let mut tests: Vec<Trial> = Vec::new();
    operations::usage::tests(&mut tests);
    operations::prune::tests(&mut tests);
    operations::resume::tests(&mut tests);
    #[cfg(unix)]
    operations::hdfs_cli::tests(&mut tests);

    libtest_mimic::run(&args, tests).exit();
}
