use genealogy_sort::{bench, cli, genealogy, logger, sorting::Algorithm};
use rand::{rngs::StdRng, SeedableRng};
use std::{error::Error, fs::File, path::Path};

/*
Times the four sorting algorithms on random genealogy records of growing size
and writes genealogy_sorting_times.csv, the input of the `plot` binary.
*/

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = cli::bench_cli();
    logger::init();

    flame::start("main");

    let mut rng = match arguments.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let table = flame::span_of("benchmark", || bench::run(&arguments.sizes, &mut rng));
    table.write_path(Path::new(bench::TIMINGS_FILE))?;

    let mut sample = genealogy::generate_people(arguments.sample, &mut rng);
    Algorithm::Std.sort(&mut sample);
    genealogy::write_people_csv(&sample, Path::new(bench::SORTED_SAMPLE_FILE))?;

    log::info!(
        "wrote {} and {}",
        bench::TIMINGS_FILE,
        bench::SORTED_SAMPLE_FILE
    );

    flame::end("main");
    if let Some(path) = arguments.flamegraph {
        flame::dump_html(File::create(&path)?)?;
        log::info!("flamegraph written to {}", path);
    }

    Ok(())
}
