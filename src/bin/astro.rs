use std::path::PathBuf;

use anyhow::{Context, bail};
use astro_dashboard::calculators::binary::{self, BinaryInput, BinaryPage};
use astro_dashboard::calculators::blackhole::{self, BlackHoleInput, BlackHolePage};
use astro_dashboard::calculators::escape::{self, EscapeInput, EscapePage};
use astro_dashboard::calculators::gravity::{self, GravityInput, GravityPage};
use astro_dashboard::calculators::luminosity::{self, LuminosityInput, LuminosityPage};
use astro_dashboard::calculators::orbit::{self, OrbitInput, OrbitPage};
use astro_dashboard::calculators::parallax::{self, ParallaxInput, ParallaxMode, ParallaxPage};
use astro_dashboard::calculators::roche::{self, RocheInput, RochePage};
use astro_dashboard::calculators::system::{PlanetInput, SystemInput, SystemPage};
use astro_dashboard::calculators::{Calculator, evaluate, handoff};
use astro_dashboard::config::{AppConfig, load_app_config, load_page_defaults};
use astro_dashboard::core::ScientificValue;
use astro_dashboard::export::HandoffTarget;
use astro_dashboard::export::series::{SeriesColumns, write_series_to_path};
use astro_dashboard::input::{PageInput, override_field};
use astro_dashboard::plot::{RenderOptions, render};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Astrophysics calculators with charts and visualizer handoff"
)]
struct Cli {
    /// Configuration file (TOML or YAML) with handoff settings and page defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Page defaults (YAML list, TOML file, or directory of TOML files); take precedence over --config
    #[arg(long, global = true)]
    pages: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Render the page chart to this file (.png or .svg)
    #[arg(long)]
    plot: Option<PathBuf>,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 700)]
    height: u32,
    /// Write the chart samples as CSV ("-" for stdout)
    #[arg(long)]
    series: Option<PathBuf>,
    /// Write the visualizer data file
    #[arg(long)]
    export: bool,
    /// Start the visualizer on the target directory (writes the data file first)
    #[arg(long)]
    launch: bool,
    /// Visualizer target, e.g. `pong` or `kepler` (defaults to the page's first target)
    #[arg(long)]
    target: Option<String>,
    /// Print the export record as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Two-body orbital period
    Orbit {
        /// Central mass in kg, e.g. 1.989e30
        #[arg(long)]
        central_mass: Option<ScientificValue>,
        /// Orbiting body mass in kg
        #[arg(long)]
        body_mass: Option<ScientificValue>,
        /// Semi-major axis in m
        #[arg(long)]
        semi_major_axis: Option<ScientificValue>,
        #[arg(long)]
        eccentricity: Option<f64>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Periods of 2-5 independent planets around one central mass
    System {
        #[arg(long)]
        central_mass: Option<ScientificValue>,
        /// Number of default planets when no --planet is given
        #[arg(long)]
        count: Option<usize>,
        /// Planet as MASS,AXIS[,ECCENTRICITY]; repeat for each planet
        #[arg(long = "planet")]
        planets: Vec<PlanetInput>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Equal-mass binary star period
    Binary {
        /// Mass of one star in kg
        #[arg(long)]
        star_mass: Option<ScientificValue>,
        /// Distance between the stars in m
        #[arg(long)]
        separation: Option<ScientificValue>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Rigid-body Roche limit
    Roche {
        #[arg(long)]
        primary_mass: Option<ScientificValue>,
        #[arg(long)]
        satellite_mass: Option<ScientificValue>,
        #[arg(long)]
        satellite_radius: Option<ScientificValue>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Escape velocity
    Escape {
        #[arg(long)]
        mass: Option<ScientificValue>,
        #[arg(long)]
        radius: Option<ScientificValue>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Surface gravity
    Gravity {
        #[arg(long)]
        mass: Option<ScientificValue>,
        #[arg(long)]
        radius: Option<ScientificValue>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Schwarzschild radius
    Blackhole {
        #[arg(long)]
        mass: Option<ScientificValue>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Stellar luminosity, flux, peak wavelength, and colour
    Luminosity {
        /// Star radius in m
        #[arg(long)]
        radius: Option<ScientificValue>,
        /// Surface temperature in K
        #[arg(long)]
        temperature: Option<ScientificValue>,
        /// Distance from the star in m
        #[arg(long)]
        distance: Option<ScientificValue>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// Distance from parallax, or parallax from distance
    Parallax {
        /// Parallax in arcsec
        #[arg(long, conflicts_with = "distance")]
        parallax: Option<ScientificValue>,
        /// Distance in parsecs; switches to distance-first mode
        #[arg(long)]
        distance: Option<ScientificValue>,
        #[command(flatten)]
        out: OutputArgs,
    },
    /// List the input defaults of one page or of every page
    Defaults { page: Option<String> },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => load_app_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AppConfig::default(),
    }
    .with_env_overrides();
    if let Some(path) = &cli.pages {
        let mut pages = load_page_defaults(path)
            .with_context(|| format!("failed to load page defaults {}", path.display()))?;
        pages.append(&mut config.pages);
        config.pages = pages;
    }

    match cli.command {
        Command::Orbit {
            central_mass,
            body_mass,
            semi_major_axis,
            eccentricity,
            out,
        } => {
            let base = OrbitInput::with_defaults(config.page(OrbitPage::PAGE));
            let input = OrbitInput {
                central_mass: override_field(&orbit::CENTRAL_MASS, base.central_mass, central_mass),
                body_mass: override_field(&orbit::BODY_MASS, base.body_mass, body_mass),
                semi_major_axis: override_field(
                    &orbit::SEMI_MAJOR_AXIS,
                    base.semi_major_axis,
                    semi_major_axis,
                ),
                eccentricity: eccentricity.unwrap_or(base.eccentricity),
            };
            run_page::<OrbitPage>(input, &out, &config)
        }
        Command::System {
            central_mass,
            count,
            planets,
            out,
        } => {
            let mut input = SystemInput::with_defaults(config.page(SystemPage::PAGE));
            input.central_mass =
                override_field(&orbit::CENTRAL_MASS, input.central_mass, central_mass);
            if !planets.is_empty() {
                input.planets = planets
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| p.accept(i))
                    .collect();
            } else if let Some(count) = count {
                input.planets = (0..count)
                    .map(|i| {
                        input
                            .planets
                            .get(i)
                            .copied()
                            .unwrap_or_else(|| PlanetInput::default_at(i))
                    })
                    .collect();
            }
            run_page::<SystemPage>(input, &out, &config)
        }
        Command::Binary {
            star_mass,
            separation,
            out,
        } => {
            let base = BinaryInput::with_defaults(config.page(BinaryPage::PAGE));
            let input = BinaryInput {
                star_mass: override_field(&binary::STAR_MASS, base.star_mass, star_mass),
                separation: override_field(&binary::SEPARATION, base.separation, separation),
            };
            run_page::<BinaryPage>(input, &out, &config)
        }
        Command::Roche {
            primary_mass,
            satellite_mass,
            satellite_radius,
            out,
        } => {
            let base = RocheInput::with_defaults(config.page(RochePage::PAGE));
            let input = RocheInput {
                primary_mass: override_field(&roche::PRIMARY_MASS, base.primary_mass, primary_mass),
                satellite_mass: override_field(
                    &roche::SATELLITE_MASS,
                    base.satellite_mass,
                    satellite_mass,
                ),
                satellite_radius: override_field(
                    &roche::SATELLITE_RADIUS,
                    base.satellite_radius,
                    satellite_radius,
                ),
            };
            run_page::<RochePage>(input, &out, &config)
        }
        Command::Escape { mass, radius, out } => {
            let base = EscapeInput::with_defaults(config.page(EscapePage::PAGE));
            let input = EscapeInput {
                mass: override_field(&escape::BODY_MASS, base.mass, mass),
                radius: override_field(&escape::BODY_RADIUS, base.radius, radius),
            };
            run_page::<EscapePage>(input, &out, &config)
        }
        Command::Gravity { mass, radius, out } => {
            let base = GravityInput::with_defaults(config.page(GravityPage::PAGE));
            let input = GravityInput {
                mass: override_field(&gravity::PLANET_MASS, base.mass, mass),
                radius: override_field(&gravity::PLANET_RADIUS, base.radius, radius),
            };
            run_page::<GravityPage>(input, &out, &config)
        }
        Command::Blackhole { mass, out } => {
            let base = BlackHoleInput::with_defaults(config.page(BlackHolePage::PAGE));
            let input = BlackHoleInput {
                mass: override_field(&blackhole::MASS, base.mass, mass),
            };
            run_page::<BlackHolePage>(input, &out, &config)
        }
        Command::Luminosity {
            radius,
            temperature,
            distance,
            out,
        } => {
            let base = LuminosityInput::with_defaults(config.page(LuminosityPage::PAGE));
            let input = LuminosityInput {
                radius: override_field(&luminosity::STAR_RADIUS, base.radius, radius),
                temperature: override_field(
                    &luminosity::STAR_TEMPERATURE,
                    base.temperature,
                    temperature,
                ),
                distance: override_field(&luminosity::DISTANCE, base.distance, distance),
            };
            run_page::<LuminosityPage>(input, &out, &config)
        }
        Command::Parallax {
            parallax: p,
            distance,
            out,
        } => {
            let base = ParallaxInput::with_defaults(config.page(ParallaxPage::PAGE));
            let input = ParallaxInput {
                mode: if distance.is_some() {
                    ParallaxMode::Distance
                } else {
                    ParallaxMode::Parallax
                },
                parallax: override_field(&parallax::PARALLAX, base.parallax, p),
                distance: override_field(&parallax::DISTANCE, base.distance, distance),
            };
            run_page::<ParallaxPage>(input, &out, &config)
        }
        Command::Defaults { page } => print_defaults(page.as_deref(), &config),
    }
}

/// One calculation pass followed by whichever outputs were requested.
fn run_page<C: Calculator>(
    input: C::Input,
    out: &OutputArgs,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let evaluation =
        evaluate::<C>(input).with_context(|| format!("{} calculation failed", C::PAGE))?;

    if out.json {
        let record = evaluation.record()?;
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", evaluation.report());
    }

    if out.plot.is_some() || out.series.is_some() {
        let Some(spec) = evaluation.plot() else {
            bail!("the {} page has no chart", C::PAGE);
        };
        if let Some(path) = &out.plot {
            let options = RenderOptions {
                width: out.width,
                height: out.height,
            };
            render(&spec, path, options)?;
            eprintln!("[plot] {}", path.display());
        }
        if let Some(path) = &out.series {
            let samples = spec.samples();
            let columns: Vec<SeriesColumns<'_>> = samples
                .iter()
                .map(|(name, points)| SeriesColumns {
                    name: name.as_str(),
                    points: points.as_slice(),
                })
                .collect();
            write_series_to_path(
                path,
                &spec.x_axis.column_name(),
                &spec.y_axis.column_name(),
                &columns,
            )?;
        }
    }

    if out.export || out.launch {
        let target = match &out.target {
            Some(name) => HandoffTarget::from_subdir(name)
                .with_context(|| format!("unknown visualizer target '{name}'"))?,
            None => C::targets()[0],
        };
        let summary = handoff(&evaluation, &config.handoff, target, out.launch)?;
        match &summary.path {
            Some(path) => eprintln!("[saved] {}", path.display()),
            None if !out.launch => {
                eprintln!("[info] '{target}' has no data file; pass --launch to start it")
            }
            None => {}
        }
        match summary.visualizer {
            Some(Ok(())) => eprintln!("[launched] {target}"),
            Some(Err(err)) => eprintln!("[warn] {err}"),
            None => {}
        }
    }

    Ok(())
}

type DefaultsLister = fn(&AppConfig);

const PAGES: [(&str, DefaultsLister); 9] = [
    (OrbitPage::PAGE, list_defaults::<OrbitPage>),
    (SystemPage::PAGE, list_defaults::<SystemPage>),
    (BinaryPage::PAGE, list_defaults::<BinaryPage>),
    (RochePage::PAGE, list_defaults::<RochePage>),
    (EscapePage::PAGE, list_defaults::<EscapePage>),
    (GravityPage::PAGE, list_defaults::<GravityPage>),
    (BlackHolePage::PAGE, list_defaults::<BlackHolePage>),
    (LuminosityPage::PAGE, list_defaults::<LuminosityPage>),
    (ParallaxPage::PAGE, list_defaults::<ParallaxPage>),
];

fn print_defaults(page: Option<&str>, config: &AppConfig) -> anyhow::Result<()> {
    let selected: Vec<&(&str, DefaultsLister)> = match page {
        Some(name) => {
            let Some(found) = PAGES.iter().find(|(p, _)| p.eq_ignore_ascii_case(name)) else {
                let names: Vec<&str> = PAGES.iter().map(|(p, _)| *p).collect();
                bail!("unknown page '{name}' (expected one of: {})", names.join(", "));
            };
            vec![found]
        }
        None => PAGES.iter().collect(),
    };
    for (_, list) in selected {
        list(config);
    }
    Ok(())
}

fn list_defaults<C: Calculator>(config: &AppConfig) {
    let configured = config.page(C::PAGE);
    println!("[{}] {}", C::PAGE, C::TITLE);
    for field in C::fields() {
        let value = field.resolve(configured);
        let marker = if value != field.default { " (configured)" } else { "" };
        println!(
            "  {:<26} {} × 10^{} {}  exponent {}..={}{marker}",
            field.key,
            value.coefficient,
            value.exponent,
            field.unit,
            field.exponents.min,
            field.exponents.max,
        );
    }
    for scalar in C::scalars() {
        let value = scalar.resolve(configured);
        let marker = if value != scalar.default { " (configured)" } else { "" };
        println!(
            "  {:<26} {value}  range {}..={}{marker}",
            scalar.key, scalar.min, scalar.max,
        );
    }
}
