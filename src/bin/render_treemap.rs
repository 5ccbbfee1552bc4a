use std::fs;
#[cfg(feature = "cairo-backend")]
use std::path::Path;
use std::path::PathBuf;

use treemap_rs::TreemapResult;
use treemap_rs::api::{TreemapChart, TreemapChartConfig};
use treemap_rs::core::RawNode;
use treemap_rs::dataset::{DatasetSource, load_dataset};
#[cfg(feature = "cairo-backend")]
use treemap_rs::render::CairoRenderer;
use treemap_rs::render::SvgRenderer;
use treemap_rs::telemetry::{DEFAULT_LOG_DIRECTIVE, init_tracing_with_directive};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Svg,
    Json,
    #[cfg(feature = "cairo-backend")]
    Png,
}

#[derive(Debug)]
struct CliArgs {
    source: DatasetSource,
    config: Option<PathBuf>,
    format: OutputFormat,
    output: PathBuf,
    verbose: bool,
}

const USAGE: &str = "usage: render_treemap [--input <path> | --url <url>] [--config <path>] [--format html|svg|json|png] [--verbose] --output <path>";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let directive = if args.verbose {
        "treemap_rs=debug"
    } else {
        DEFAULT_LOG_DIRECTIVE
    };
    let _ = init_tracing_with_directive(directive);

    let config = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            TreemapChartConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => TreemapChartConfig::default(),
    };
    let dataset = load_dataset(&args.source).map_err(|err| err.to_string())?;

    let body = match args.format {
        OutputFormat::Html | OutputFormat::Svg | OutputFormat::Json => {
            render_text(args.format, config, &dataset).map_err(|err| err.to_string())?
        }
        #[cfg(feature = "cairo-backend")]
        OutputFormat::Png => {
            return render_png(config, &dataset, &args.output).map_err(|err| err.to_string());
        }
    };

    fs::write(&args.output, body)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))
}

fn render_text(
    format: OutputFormat,
    config: TreemapChartConfig,
    dataset: &RawNode,
) -> TreemapResult<String> {
    let renderer = SvgRenderer::new().with_font_family(config.font_family.clone());
    let mut chart = TreemapChart::new(renderer, config, dataset)?;
    match format {
        OutputFormat::Svg => chart.to_svg(),
        OutputFormat::Json => chart.snapshot_json_contract_v1_pretty(),
        _ => chart.to_html_page(),
    }
}

#[cfg(feature = "cairo-backend")]
fn render_png(config: TreemapChartConfig, dataset: &RawNode, output: &Path) -> TreemapResult<()> {
    let renderer = CairoRenderer::new().with_font_family(config.font_family.clone());
    let mut chart = TreemapChart::new(renderer, config, dataset)?;
    chart.render()?;
    chart.renderer().write_page_png(output)
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut source = None::<DatasetSource>;
    let mut config = None::<PathBuf>;
    let mut format = OutputFormat::Html;
    let mut output = None::<PathBuf>;
    let mut verbose = false;

    while let Some(flag) = args.next() {
        let mut value = || {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}\n{USAGE}"))
        };
        match flag.as_str() {
            "--input" => source = Some(DatasetSource::File(PathBuf::from(value()?))),
            "--url" => source = Some(DatasetSource::Url(value()?)),
            "--config" => config = Some(PathBuf::from(value()?)),
            "--format" => {
                format = match value()?.as_str() {
                    "html" => OutputFormat::Html,
                    "svg" => OutputFormat::Svg,
                    "json" => OutputFormat::Json,
                    #[cfg(feature = "cairo-backend")]
                    "png" => OutputFormat::Png,
                    other => return Err(format!("unknown format `{other}`\n{USAGE}")),
                }
            }
            "--output" => output = Some(PathBuf::from(value()?)),
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        source: source.unwrap_or_default(),
        config,
        format,
        output: output.ok_or_else(|| format!("missing --output\n{USAGE}"))?,
        verbose,
    })
}
