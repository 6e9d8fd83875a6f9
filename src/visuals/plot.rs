use genealogy_sort::{
    chart::{self, Figure},
    cli, display, logger,
};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    cli::plot_cli();
    logger::init();

    let output = Path::new(chart::OUTPUT_FILE);
    chart::generate(Path::new(chart::INPUT_FILE), output, &Figure::default())?;

    // the chart is already on disk; a missing viewer is not a failure
    display::show(output);

    Ok(())
}
