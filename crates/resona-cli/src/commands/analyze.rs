//! Characteristic frequency summary.

use clap::Args;
use resona_core::{CharacteristicSolver, format_polynomial};

use super::common::{
    FilterArgs, StrategyArg, characteristics_json, describe_components, print_characteristics,
    to_spec,
};

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    filter: FilterArgs,

    /// Cutoff derivation
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,

    /// Fail if independent derivations disagree
    #[arg(long)]
    strict: bool,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let design = args.filter.load_design()?;
    let spec = to_spec(&design)?;
    let tf = spec.transfer_function()?;
    let cf = CharacteristicSolver::new(args.strategy.into()).solve(&spec)?;

    if args.strict {
        cf.ensure_consistent()?;
    }

    if args.json {
        let json = serde_json::json!({
            "name": design.name,
            "kind": spec.kind().name(),
            "resistance": spec.resistance(),
            "inductance": spec.inductance(),
            "capacitance": spec.capacitance(),
            "numerator": tf.numerator(),
            "denominator": tf.denominator(),
            "characteristics": characteristics_json(&cf),
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    println!("{} ({})", design.name, spec.kind());
    println!("  {}", describe_components(&spec));
    println!();
    println!("  H(s) numerator:   {}", format_polynomial(tf.numerator()));
    println!("  H(s) denominator: {}", format_polynomial(tf.denominator()));
    println!();
    print_characteristics(&cf);

    Ok(())
}
