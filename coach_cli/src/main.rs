use clap::{Parser, Subcommand, ValueEnum};
use coach_core::*;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fitcoach")]
#[command(about = "Attach catalog media to generated fitness plans", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Attach media to a generated plan (JSON file, or - for stdin)
    Enrich {
        #[arg(value_enum)]
        kind: KindArg,

        input: PathBuf,

        /// Write the enriched plan here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Fill blank item descriptions from the catalog
        #[arg(long)]
        backfill_descriptions: bool,
    },

    /// Show the catalog entry a free-text name resolves to
    Match {
        #[arg(value_enum)]
        kind: KindArg,

        name: String,
    },

    /// List or search a catalog
    Catalog {
        #[arg(value_enum)]
        kind: KindArg,

        /// Substring of the entry name
        #[arg(long)]
        search: Option<String>,

        /// Substring of the focus area or category
        #[arg(long)]
        focus: Option<String>,
    },

    /// Compute BMI and daily calorie target
    Metrics {
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Height in centimetres
        #[arg(long)]
        height: f64,

        #[arg(long)]
        age: Option<u32>,

        /// Male, Female or Other
        #[arg(long)]
        gender: Option<String>,

        /// Beginner, Intermediate or Advanced
        #[arg(long)]
        activity: Option<String>,

        /// Lose Weight, Gain Muscle, Stay Fit or Build Endurance
        #[arg(long)]
        goal: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    #[value(alias = "exercise")]
    Workout,
    Yoga,
    Meditation,
}

impl From<KindArg> for CatalogKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Workout => CatalogKind::Exercise,
            KindArg::Yoga => CatalogKind::Yoga,
            KindArg::Meditation => CatalogKind::Meditation,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    coach_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    tracing::debug!(config = ?cli.config, "configuration loaded");

    match cli.command {
        Commands::Enrich {
            kind,
            input,
            output,
            backfill_descriptions,
        } => cmd_enrich(
            &config,
            kind.into(),
            &input,
            output.as_deref(),
            backfill_descriptions,
        ),
        Commands::Match { kind, name } => cmd_match(&config, kind.into(), &name),
        Commands::Catalog {
            kind,
            search,
            focus,
        } => cmd_catalog(&config, kind.into(), CatalogQuery { search, focus }),
        Commands::Metrics {
            weight,
            height,
            age,
            gender,
            activity,
            goal,
        } => {
            let profile = UserProfile {
                age,
                gender: gender.map(Gender::from),
                height_cm: Some(height),
                weight_kg: Some(weight),
                goal: goal.map(Goal::from),
                activity_level: activity.map(ActivityLevel::from),
                ..Default::default()
            };
            cmd_metrics(profile)
        }
    }
}

fn cmd_enrich(
    config: &Config,
    kind: CatalogKind,
    input: &Path,
    output: Option<&Path>,
    backfill_descriptions: bool,
) -> Result<()> {
    let catalogs = Catalogs::load(config)?;

    let raw = read_input(input)?;
    let value: serde_json::Value = serde_json::from_str(&strip_code_fences(&raw))?;
    let mut plan = GeneratedPlan::from_value(kind, value)?;

    let matcher = CatalogMatcher::new(catalogs.get(kind), config.matching.policy_for(kind));
    let mut options = EnrichOptions::from(&config.enrich);
    options.backfill_descriptions |= backfill_descriptions;

    let report = attach_media_with(&mut plan, &matcher, &options);

    let rendered = serde_json::to_string_pretty(&plan.to_value()?)?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))?;
            println!("✓ Wrote enriched plan to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    eprintln!(
        "Matched {}/{} items ({} without media)",
        report.matched,
        report.total,
        report.unmatched()
    );

    Ok(())
}

fn cmd_match(config: &Config, kind: CatalogKind, name: &str) -> Result<()> {
    let catalogs = Catalogs::load(config)?;
    let catalog = catalogs.get(kind);
    let policy = config.matching.policy_for(kind);

    match best_match(name, catalog, &policy) {
        Some(m) => {
            println!("Best match: {} (score {:.2})", m.entry.name, m.score);
            println!("  Media: {}", m.entry.media.as_deref().unwrap_or("-"));
            if let Some(ref image) = m.entry.image {
                println!("  Image: {}", image);
            }
        }
        None => {
            println!("No confident match for {:?}", name);
            if let Some(c) = coach_core::matcher::best_candidate(name, catalog, policy.strategy) {
                println!(
                    "  Closest: {} (score {:.2} < threshold {})",
                    c.entry.name, c.score, policy.threshold
                );
            }
        }
    }

    Ok(())
}

fn cmd_catalog(config: &Config, kind: CatalogKind, query: CatalogQuery) -> Result<()> {
    let catalogs = Catalogs::load(config)?;
    let entries = catalogs.get(kind).search(&query);

    for entry in &entries {
        let tags: Vec<&str> = [&entry.category, &entry.focus_area]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        println!(
            "  {:<40} {:<32} {}",
            entry.name,
            tags.join(" / "),
            entry.media.as_deref().unwrap_or("-")
        );
    }
    println!("{} {} entries", entries.len(), kind);

    Ok(())
}

fn cmd_metrics(mut profile: UserProfile) -> Result<()> {
    derive_metrics(&mut profile);

    let category = profile.bmi_category.unwrap_or(BmiCategory::Unknown);
    match profile.bmi {
        Some(bmi) => println!("BMI: {:.1} ({})", bmi, category),
        None => println!("BMI: unknown ({})", category),
    }

    match profile.target_calories {
        Some(kcal) => println!("Daily calories: {} kcal", kcal),
        None => println!("Daily calories: need --age and --gender"),
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Drop Markdown code fences that text generators wrap around JSON
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(strip_code_fences("```\n[]\n```\n"), "[]");
    }
}
