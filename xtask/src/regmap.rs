use anyhow::{Context, Result};
use colored::Colorize;
use dac::mock::MockBus;
use dac::{DacConfig, Pcm5122, RegisterMap};
use platform::DacControl;

/// Print the PCM5122 register map.
///
/// With `init`, runs the default bring-up against a recording bus first and
/// prints the values it wrote next to each register.
pub fn run(init: bool) -> Result<()> {
    println!();
    println!("{}", "🗺  PCM5122 register map".cyan().bold());
    println!();

    let config = DacConfig::default();
    let freqs = config
        .validate()
        .context("Default clock plan is invalid")?;

    if init {
        let mut dac = Pcm5122::with_config(MockBus::new(), config);
        dac.initialize()
            .context("Bring-up against the recording bus failed")?;
        println!("{}", dac.dump());
        println!();
        println!(
            "{}",
            format!(
                "  {} writes issued during bring-up",
                dac.access().bus().writes().len()
            )
            .dimmed()
        );
    } else {
        println!("{}", RegisterMap::PCM5122.dump());
    }

    println!();
    println!("{}", "  Clock tree (44.1 kHz, BCK reference)".cyan());
    for (name, hz) in [
        ("PLL input", freqs.pll_input_hz),
        ("PLL output", freqs.pll_output_hz),
        ("DSP", freqs.dsp_hz),
        ("DAC", freqs.dac_hz),
        ("NCP", freqs.ncp_hz),
        ("OSR", freqs.osr_hz),
    ] {
        println!("    {name:<10} {hz:>11} Hz");
    }
    println!();

    Ok(())
}
