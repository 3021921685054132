use admission_score::app::report::{read_students, write_reports};
use admission_score::utils::{logger, validation::Validate};
use admission_score::{CalculatorRegistry, CalculatorType, CliConfig, LocalStorage, SeasonConfig};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;

struct RunPlan {
    calculator_type: CalculatorType,
    students: PathBuf,
    output: String,
    formats: Vec<String>,
}

fn resolve_plan(cli: &CliConfig) -> Result<RunPlan> {
    if let Some(path) = &cli.config {
        tracing::info!("📁 Loading season configuration from: {}", path.display());
        let season = SeasonConfig::from_file(path)
            .with_context(|| format!("failed to load season file '{}'", path.display()))?;
        if let Err(e) = season.validate() {
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            return Err(e).context("season configuration is invalid");
        }
        tracing::info!("✅ Season '{}' uses the {} calculator", season.season.name, season.calculator_type());
        return Ok(RunPlan {
            calculator_type: season.calculator_type(),
            students: PathBuf::from(&season.input.students),
            output: season.output.path.clone(),
            formats: season.formats(),
        });
    }

    let Some(calculator) = &cli.calculator else {
        bail!("either --config or --calculator is required");
    };
    let calculator_type: CalculatorType = calculator.parse()?;
    let Some(students) = &cli.students else {
        bail!("--students is required without --config");
    };

    Ok(RunPlan {
        calculator_type,
        students: students.clone(),
        output: cli.output.clone(),
        formats: vec!["csv".to_string(), "json".to_string()],
    })
}

fn main() -> Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting admission-score");
    let registry = CalculatorRegistry::with_defaults();

    if cli.explain && cli.config.is_none() && cli.students.is_none() {
        let calculator_type: CalculatorType = cli
            .calculator
            .as_deref()
            .context("--explain needs --calculator or --config")?
            .parse()?;
        let info = registry.find(calculator_type)?.calculator_info();
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let plan = resolve_plan(&cli)?;
    let calculator = registry.find(plan.calculator_type)?;

    if cli.explain {
        println!("{}", serde_json::to_string_pretty(&calculator.calculator_info())?);
        return Ok(());
    }

    let input_dir = plan
        .students
        .parent()
        .map(|dir| dir.to_string_lossy().to_string())
        .filter(|dir| !dir.is_empty())
        .unwrap_or_else(|| ".".to_string());
    let input_name = plan
        .students
        .file_name()
        .context("students path has no file name")?
        .to_string_lossy()
        .to_string();
    let mut students = read_students(&LocalStorage::new(input_dir), &input_name)
        .with_context(|| format!("failed to load students from '{}'", plan.students.display()))?;
    tracing::info!("📥 Loaded {} students", students.len());

    let summary = registry.score_batch(plan.calculator_type, &mut students)?;

    let storage = LocalStorage::new(plan.output.clone());
    let written = write_reports(&storage, &plan.formats, calculator, &students, &summary)?;

    println!("✅ Scored {} students", summary.outcomes.len());
    for file in written {
        println!("📁 {}/{}", plan.output, file);
    }

    Ok(())
}
