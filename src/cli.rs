//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "rankloader", about = "inverted index bulk loading tool.")]
/// Load command and parameters.
///
/// ```sh
/// rankloader 0.1.0
/// inverted index bulk loading tool.
///
/// USAGE:
///     rankloader [FLAGS] [OPTIONS] -i <input>
///
/// FLAGS:
///     -h, --help          Prints help information
///     -V, --version       Prints version information
///         --with-index    also persist raw index entries
///
/// OPTIONS:
///     -i, --input <input>            path to an inverted index output file
///         --endpoint <endpoint>      store endpoint URL
///         --batch-size <n>           number of items in a bulk write. Default is 25.
///     -c, --concurrency <n>          number of batches in flight. Default is 4.
///         --max-retries <n>          retries per batch after the initial attempt. Default is 3.
/// ```
pub struct Opt {
    #[structopt(
        short = "i",
        long = "input",
        parse(from_os_str),
        help = "path to an inverted index output file"
    )]
    pub input: PathBuf,
    #[structopt(
        long = "endpoint",
        help = "store endpoint URL. Omit to load into an in-memory store."
    )]
    pub endpoint: Option<String>,
    #[structopt(
        help = "number of items in a bulk write.",
        long = "batch-size",
        default_value = "25"
    )]
    pub batch_size: usize,
    #[structopt(
        help = "number of batches in flight.",
        long = "concurrency",
        default_value = "4",
        short = "c"
    )]
    pub concurrency: usize,
    #[structopt(
        help = "retries per batch after the initial attempt.",
        long = "max-retries",
        default_value = "3"
    )]
    pub max_retries: usize,
    #[structopt(long = "with-index", help = "also persist raw index entries")]
    pub with_index: bool,
}
