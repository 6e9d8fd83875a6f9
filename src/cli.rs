use clap::{command, value_parser, Arg, ArgAction, Command};

use crate::bench::DEFAULT_SIZES;

#[derive(Debug)]
pub struct BenchArgs {
    pub sizes: Vec<usize>,
    pub seed: Option<u64>,
    pub sample: usize,
    pub flamegraph: Option<String>,
}

fn bench_command() -> Command {
    command!("Genealogy sorting benchmark")
        .about("Times Bubble, Shaker, Heap and std sort on random genealogy records and writes the results as CSV.")
        .arg(
            Arg::new("sizes")
                .help("Input sizes to benchmark, comma separated [default: 100,500,1000,...,50000]")
                .long("sizes")
                .short('n')
                .value_delimiter(',')
                .value_parser(value_parser!(usize))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("seed")
                .help("Seed for the record generator; random when omitted")
                .long("seed")
                .short('s')
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("sample")
                .help("Number of records in the sorted sample file")
                .long("sample")
                .value_parser(value_parser!(usize))
                .default_value("1000"),
        )
        .arg(
            Arg::new("flamegraph")
                .help("Write a flamegraph of the run to this HTML file")
                .long("flamegraph")
                .short('f'),
        )
}

pub fn bench_cli() -> BenchArgs {
    parse_bench(bench_command().get_matches())
}

fn parse_bench(arguments: clap::ArgMatches) -> BenchArgs {
    let sizes = match arguments.get_many::<usize>("sizes") {
        Some(sizes) => sizes.copied().collect(),
        None => DEFAULT_SIZES.to_vec(),
    };

    BenchArgs {
        sizes,
        seed: arguments.get_one::<u64>("seed").copied(),
        sample: arguments.get_one::<usize>("sample").copied().unwrap_or(1000),
        flamegraph: arguments.get_one::<String>("flamegraph").cloned(),
    }
}

/// The chart binary takes no arguments; this only provides `--help` and
/// `--version`.
pub fn plot_cli() {
    command!("Sort comparison plot")
        .about("Reads genealogy_sorting_times.csv and saves sort_comparison_plot.png (300 dpi).")
        .get_matches();
}

#[test]
fn bench_defaults_to_standard_sizes() {
    let args = parse_bench(bench_command().get_matches_from(["bench"]));
    assert_eq!(args.sizes, DEFAULT_SIZES.to_vec());
    assert_eq!(args.seed, None);
    assert_eq!(args.sample, 1000);
    assert!(args.flamegraph.is_none());
}

#[test]
fn bench_parses_sizes_and_seed() {
    let args = parse_bench(bench_command().get_matches_from([
        "bench", "--sizes", "10,20", "-n", "30", "--seed", "42", "-f", "flame.html",
    ]));
    assert_eq!(args.sizes, vec![10, 20, 30]);
    assert_eq!(args.seed, Some(42));
    assert_eq!(args.flamegraph.as_deref(), Some("flame.html"));
}
