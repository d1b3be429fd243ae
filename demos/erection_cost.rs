use erection_core::data::ProjectData;
use erection_core::physics::ExceedanceDelayEstimator;
use erection_core::{ErectionPipeline, logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/data".to_string());
    let data = ProjectData::from_directory(&dir)?;
    let inputs = data.into_inputs();

    let cost = ErectionPipeline::new(&inputs, &ExceedanceDelayEstimator).run()?;

    println!("=== Erection Cost ({} turbines) ===\n", inputs.project.turbine_count);

    for selected in &cost.selection.selected {
        println!(
            "{:<8} {} x{}  ${:.0}",
            selected.operation,
            inputs.fleet[selected.configuration],
            selected.crane_count,
            selected.line_total()
        );
    }

    println!("\n{}", "-".repeat(50));
    for line in cost.breakdown() {
        println!("{:<10} {:<18} {:>14.2}", line.phase, line.cost_type, line.cost);
    }
    println!("{}", "-".repeat(50));
    println!("{:<29} {:>14.2}", "Total", cost.total());
    println!("Wind multiplier: {:.3}", cost.wind_multiplier());

    println!();
    cost.write_csv(std::io::stdout())?;

    Ok(())
}
