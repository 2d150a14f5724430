use ladder_ac::prelude::*;

fn main() -> Result<(), LadderError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // RC low-pass written out of cascade order; the ladder ordering puts R before C.
    let records = [
        ComponentRecord::new(2, 0, parse_prefixed_value("5n").unwrap_or(5e-9), "C"),
        ComponentRecord::new(1, 2, 50.0, "R"),
    ];
    let config = AnalysisConfig::new("rc_lowpass")
        .with_sweep(FrequencySweep::logarithmic(10.0, 10.0e6, 13))
        .with_termination(Termination::new(5.0, 50.0, 50.0));
    let request = OutputRequest::new()
        .with("Vin", "mV")
        .with("Av", "dB")
        .with("Zin", "dBOhms");

    let projection = LadderAnalysis::from_records(&records)?.run_and_project(&config, &request)?;

    println!("freq(Hz), Re(Vin)(mV), Im(Vin)(mV), |Av|(dB), /_Av(rad), |Zin|(dB), /_Zin(rad)");
    for row in projection.iter() {
        let mut line = format!("{:.3e}", row.frequency);
        for entry in &row.entries {
            match entry.value.rescaled(&entry.unit) {
                ProjectedValue::Complex(v) => line.push_str(&format!(", {:.3e}, {:.3e}", v.re, v.im)),
                ProjectedValue::Decibel { mag, phase } => {
                    line.push_str(&format!(", {mag:.3e}, {phase:.3e}"));
                }
            }
        }
        println!("{line}");
    }
    Ok(())
}
