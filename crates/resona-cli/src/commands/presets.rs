//! Factory preset commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use resona_config::{factory_preset_names, get_factory_preset};

use super::common::describe_components;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List factory presets
    List,

    /// Show a preset's components, or its TOML with --toml
    Show {
        /// Preset name
        name: String,

        /// Print the design file instead of a summary
        #[arg(long)]
        toml: bool,
    },

    /// Write a preset to a design file for editing
    Export {
        /// Preset name
        name: String,

        /// Destination TOML file
        #[arg(short, long)]
        output: PathBuf,
    },
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List => {
            println!("Factory presets:");
            for name in factory_preset_names() {
                if let Some(design) = get_factory_preset(name) {
                    println!("  {:<20} {:<10} {}", name, design.kind, design.name);
                }
            }
        }

        PresetsCommand::Show { name, toml } => {
            let design = get_factory_preset(&name)
                .ok_or_else(|| anyhow::anyhow!("Preset '{name}' not found"))?;
            if toml {
                print!("{}", design.to_toml()?);
                return Ok(());
            }

            let spec = design.to_spec()?;
            println!("{}", design.name);
            if let Some(description) = &design.description {
                println!("  {description}");
            }
            println!("  kind: {}", spec.kind());
            println!("  {}", describe_components(&spec));
            if let Some(sweep) = design.sweep {
                println!(
                    "  sweep: {} to {} rad/s, {} points",
                    sweep.start, sweep.stop, sweep.points
                );
            }
            if let Some(transient) = design.transient {
                match transient.duration {
                    Some(d) => println!("  transient: {d} s, {} points", transient.points),
                    None => println!("  transient: 7τ, {} points", transient.points),
                }
            }
        }

        PresetsCommand::Export { name, output } => {
            let design = get_factory_preset(&name)
                .ok_or_else(|| anyhow::anyhow!("Preset '{name}' not found"))?;
            design.save(&output)?;
            println!("Wrote {} to {}", design.name, output.display());
        }
    }

    Ok(())
}
