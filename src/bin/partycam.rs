use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use partycam::{
    AnchorRect, GameConfig, GameSession, PartycamResult, PixelBuffer, StaticDetector, TextOverlay,
};

#[derive(Parser, Debug)]
#[command(name = "partycam", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the speech bubble over every face, sized by the wrong guesses so far.
    Sticker {
        #[command(flatten)]
        common: CommonArgs,

        /// Letters to guess before rendering, in order (e.g. "zqx").
        #[arg(long, default_value = "")]
        guesses: String,
    },
    /// Render one frame of the winning animation: corner fireworks plus a crown.
    Win {
        #[command(flatten)]
        common: CommonArgs,

        /// Animation step (0..=firework_steps).
        #[arg(long, default_value_t = 0)]
        step: u32,
    },
    /// Render one frame of the game-over cross-fade, or the captioned final screen.
    GameOver {
        #[command(flatten)]
        common: CommonArgs,

        /// Transition step (0..=game_over_steps).
        #[arg(long, default_value_t = 0)]
        step: u32,

        /// Render the final captioned screen instead of a transition frame.
        #[arg(long = "final")]
        final_screen: bool,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Game config JSON. Relative asset paths resolve next to it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input frame image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Face rectangle `x,y,w,h`; repeat for several faces.
    #[arg(long = "face")]
    faces: Vec<AnchorRect>,

    /// Seed for picking the secret word.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sticker { common, guesses } => cmd_sticker(common, &guesses),
        Command::Win { common, step } => cmd_win(common, step),
        Command::GameOver {
            common,
            step,
            final_screen,
        } => cmd_game_over(common, step, final_screen),
    }
}

fn open_session(common: &CommonArgs) -> anyhow::Result<GameSession> {
    let config = match &common.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    let detector = Box::new(StaticDetector::new(common.faces.clone()));
    Ok(GameSession::open(config, detector, common.seed)?)
}

fn read_frame(path: &Path) -> anyhow::Result<PixelBuffer> {
    let img = image::open(path).with_context(|| format!("open frame '{}'", path.display()))?;
    Ok(PixelBuffer::from_dynamic(&img).to_rgb())
}

fn write_png(path: &Path, frame: &PixelBuffer) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame
        .to_dynamic()?
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_sticker(common: CommonArgs, guesses: &str) -> anyhow::Result<()> {
    let mut session = open_session(&common)?;
    for letter in guesses.chars() {
        session.guess(letter);
    }
    eprintln!(
        "word: {}  mistakes: {}",
        session.game().masked_word(),
        session.game().mistakes()
    );

    let mut frame = read_frame(&common.in_path)?;
    let report = session.process_frame(&mut frame);
    report_frame(&report);
    write_png(&common.out, &frame)
}

fn cmd_win(common: CommonArgs, step: u32) -> anyhow::Result<()> {
    let session = open_session(&common)?;
    let mut frame = read_frame(&common.in_path)?;
    let report = session.win_frame(&mut frame, step);
    report_frame(&report);
    write_png(&common.out, &frame)
}

fn cmd_game_over(common: CommonArgs, step: u32, final_screen: bool) -> anyhow::Result<()> {
    let session = open_session(&common)?;
    let mut frame = read_frame(&common.in_path)?;
    if final_screen {
        let out = session.game_over_final(frame.canvas(), &BarCaption)?;
        return write_png(&common.out, &out);
    }
    let report = session.game_over_frame(&mut frame, step);
    report_frame(&report);
    write_png(&common.out, &frame)
}

fn report_frame(report: &partycam::FrameReport) {
    eprintln!(
        "faces: {}  composited: {}  skipped: {}",
        report.faces, report.stats.composited, report.stats.skipped
    );
    if let Some(err) = &report.recovered {
        eprintln!("frame left unmodified: {err}");
    }
}

/// Stand-in caption renderer: a solid bar where the text would sit. The caption itself goes to
/// the log.
struct BarCaption;

impl BarCaption {
    const GLYPH_W: u32 = 8;
    const GLYPH_H: u32 = 12;
}

impl TextOverlay for BarCaption {
    fn measure(&self, text: &str) -> (u32, u32) {
        let chars = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
        (chars.saturating_mul(Self::GLYPH_W), Self::GLYPH_H)
    }

    fn draw(
        &self,
        frame: &mut PixelBuffer,
        text: &str,
        origin: (u32, u32),
        rgb: [u8; 3],
    ) -> PartycamResult<()> {
        tracing::info!(text, x = origin.0, y = origin.1, "caption");
        let (w, h) = self.measure(text);
        let top = origin.1.saturating_sub(h);
        let w = w.min(frame.width().saturating_sub(origin.0));
        let h = h.min(frame.height().saturating_sub(top));
        if w == 0 || h == 0 {
            return Ok(());
        }
        let bar = PixelBuffer::filled(w, h, &rgb)?;
        frame.write_region(origin.0, top, &bar)
    }
}
