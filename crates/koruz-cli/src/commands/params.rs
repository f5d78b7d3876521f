//! Parameter listing command.

#![allow(clippy::print_literal)]

use clap::Args;
use koruz_effects::ChorusParameters;

#[derive(Args)]
pub struct ParamsArgs {}

pub fn run(_args: ParamsArgs) -> anyhow::Result<()> {
    println!("Chorus Parameters");
    println!("=================");
    println!();
    println!(
        "  {:3}  {:8}  {:8}  {:18}  {}",
        "ID", "Name", "Flag", "Range", "Default"
    );
    println!(
        "  {:3}  {:8}  {:8}  {:18}  {}",
        "--", "----", "----", "-----", "-------"
    );

    for desc in ChorusParameters::descriptors() {
        let suffix = desc.unit.suffix();
        let range = format!(
            "{}{suffix} - {}{suffix}",
            desc.to_display(desc.min),
            desc.to_display(desc.max)
        );
        println!(
            "  {:3}  {:8}  {:8}  {:18}  {}{suffix}",
            desc.id.0,
            desc.name,
            format!("--{}", desc.string_id),
            range,
            desc.to_display(desc.default)
        );
    }

    println!();
    println!("Depth and mix are given on the command line as 0-1.");
    Ok(())
}
