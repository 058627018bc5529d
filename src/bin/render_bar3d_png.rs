#[cfg(feature = "cairo-backend")]
use std::fs::{self, File};
#[cfg(feature = "cairo-backend")]
use std::io::BufWriter;
#[cfg(feature = "cairo-backend")]
use std::path::PathBuf;

#[cfg(feature = "cairo-backend")]
const DEFAULT_OUTPUT_PATH: &str = "bar3d_chart.png";

#[cfg(feature = "cairo-backend")]
#[derive(Debug)]
struct CliArgs {
    output_path: PathBuf,
    width: u32,
    height: u32,
    style_path: Option<PathBuf>,
    values: Option<Vec<f64>>,
    colors: Option<Vec<String>>,
}

#[cfg(feature = "cairo-backend")]
fn main() {
    let _ = bar3d_chart::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cairo-backend"))]
fn main() {
    eprintln!("this tool requires feature `cairo-backend`");
    std::process::exit(1);
}

#[cfg(feature = "cairo-backend")]
fn run() -> Result<(), String> {
    use bar3d_chart::api::{ChartRenderer, ChartStyle};
    use bar3d_chart::core::{DEFAULT_COLORS, DEFAULT_VALUES};
    use bar3d_chart::render::CairoSurface;

    let args = parse_args()?;
    let style = match &args.style_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read style `{}`: {err}", path.display()))?;
            ChartStyle::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => ChartStyle::default(),
    };

    let surface = CairoSurface::new(args.width, args.height).map_err(|err| err.to_string())?;
    let mut renderer = ChartRenderer::with_style(surface, style).map_err(|err| err.to_string())?;

    let values = args.values.unwrap_or_else(|| DEFAULT_VALUES.to_vec());
    let colors = args
        .colors
        .unwrap_or_else(|| DEFAULT_COLORS.iter().map(|color| color.to_hex()).collect());
    let colors: Vec<&str> = colors.iter().map(String::as_str).collect();
    renderer
        .paint_hex(&values, &colors)
        .map_err(|err| err.to_string())?;

    let file = File::create(&args.output_path).map_err(|err| {
        format!(
            "failed to create output `{}`: {err}",
            args.output_path.display()
        )
    })?;
    renderer
        .surface()
        .write_png(&mut BufWriter::new(file))
        .map_err(|err| err.to_string())?;

    println!(
        "wrote {}x{} chart to {}",
        args.width,
        args.height,
        args.output_path.display()
    );
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn parse_args() -> Result<CliArgs, String> {
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut width = 800u32;
    let mut height = 600u32;
    let mut style_path: Option<PathBuf> = None;
    let mut values: Option<Vec<f64>> = None;
    let mut colors: Option<Vec<String>> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value_for =
            |flag: &str| args.next().ok_or_else(|| format!("missing value for {flag}"));
        match arg.as_str() {
            "--output" => output_path = PathBuf::from(value_for("--output")?),
            "--width" => width = parse_dimension(&value_for("--width")?, "--width")?,
            "--height" => height = parse_dimension(&value_for("--height")?, "--height")?,
            "--style" => style_path = Some(PathBuf::from(value_for("--style")?)),
            "--values" => {
                let raw = value_for("--values")?;
                let parsed = raw
                    .split(',')
                    .map(|item| {
                        item.trim()
                            .parse::<f64>()
                            .map_err(|err| format!("invalid value `{item}`: {err}"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                values = Some(parsed);
            }
            "--colors" => {
                let raw = value_for("--colors")?;
                colors = Some(raw.split(',').map(|item| item.trim().to_owned()).collect());
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        output_path,
        width,
        height,
        style_path,
        values,
        colors,
    })
}

#[cfg(feature = "cairo-backend")]
fn parse_dimension(raw: &str, flag: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|err| format!("invalid value for {flag}: {err}"))
}

#[cfg(feature = "cairo-backend")]
fn print_usage() {
    println!("{}", usage_message());
}

#[cfg(feature = "cairo-backend")]
fn usage_message() -> String {
    format!(
        "usage: render_bar3d_png [--output PATH] [--width PX] [--height PX] \
         [--style STYLE.json] [--values 10,55,20] [--colors '#FF6384,#36A2EB,#FFCE56']\n\
         defaults: output={DEFAULT_OUTPUT_PATH}, 800x600, stock five-bar series"
    )
}
