use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::Parser;
use env_logger::Env;
use image_backdrop::{codec, config::Config, imageutils, Color, Opacity};

/// Composite an image over a solid background color.
#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Args {
    /// Source image
    src: PathBuf,
    /// Destination image; the format follows the extension
    dst: PathBuf,

    /// Background color, #RRGGBB
    #[arg(long, value_parser = Color::from_arg)]
    background: Color,

    /// How much of the source shows through, 0.0 to 1.0
    #[arg(long, value_parser = Opacity::from_arg, allow_hyphen_values = true)]
    opacity: Opacity,

    /// JPEG quality, 1 to 100
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        Env::default().default_filter_or("backdrop=info,image_backdrop=info"),
    )
    .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut message = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {}", cause));
                source = cause.source();
            }
            eprintln!("backdrop: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), image_backdrop::Error> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let quality = args.quality.unwrap_or(config.quality);

    let photo = codec::decode(&args.src)?;
    let out = imageutils::blend_dynamic(args.background, args.opacity, &photo)?;
    codec::encode(&args.dst, &out, quality)?;

    log::info!(
        "Wrote {} ({}x{}, background {}, opacity {})",
        args.dst.display(),
        out.width(),
        out.height(),
        args.background,
        args.opacity
    );
    Ok(())
}
