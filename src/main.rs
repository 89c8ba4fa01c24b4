// What you SEE:
// • A white pad with a dashed guideline and "SIGN WITHIN THIS AREA".
// • Hold Left Mouse and drag: ink follows the cursor.
// • Enter completes: the signature is written as a PNG (or we log that it's empty).
// • C clears the pad. ESC quits (strokes are saved if --state was given).

mod draw;

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::Parser;
use draw::{draw_crosshair, draw_text_5x7, draw_text_centered, Drawer};
use signature_pad::{Error, PadConfig, Point, SignatureAction, SignaturePad, SignatureState};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "signature-pad")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Draw a signature and save it as a PNG", long_about = None)]
struct Cli {
    /// Pad configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Strokes file: restored on start if present, written on exit
    #[arg(short, long)]
    state: Option<PathBuf>,

    /// Where Enter writes the finished signature
    #[arg(short, long, default_value = "signature.png")]
    out: PathBuf,

    /// Enable debug logging (RUST_LOG still wins when set)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn load_state(path: Option<&Path>) -> Result<SignatureState, Error> {
    match path {
        Some(p) if p.exists() => {
            let state = SignatureState::from_json(&fs::read_to_string(p)?)?;
            info!(path = %p.display(), segments = state.len(), "restored strokes");
            Ok(state)
        }
        _ => Ok(SignatureState::new()),
    }
}

/// Feed one frame of mouse state into the pad. Returns whether a stroke is in progress.
/// A press that starts with no cursor position begins the stroke on the first
/// frame that has one.
fn feed_pointer(pad: &mut SignaturePad, pen_down: bool, button_down: bool, pos: Option<Point>) -> bool {
    match (pen_down, button_down, pos) {
        (false, true, Some(p)) => {
            pad.pointer_down(p);
            true
        }
        (true, true, Some(p)) => {
            pad.pointer_move(p);
            true
        }
        (true, false, _) => {
            pad.pointer_up();
            false
        }
        _ => pen_down,
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    /* --- Config + restored strokes ---
       Visual: nothing yet; decides pad size, colors, guideline. */
    let config = match &cli.config {
        Some(path) => PadConfig::load(path)?,
        None => PadConfig::default(),
    };
    let state = load_state(cli.state.as_deref())?;

    /* --- Completion sink ---
       The pad hands us Some(image) or None; we write the file after the callback. */
    let completed: Rc<RefCell<Option<Option<signature_pad::SignatureImage>>>> = Rc::default();
    let sink = completed.clone();
    let mut pad = SignaturePad::with_state(config.clone(), state)
        .on_complete(move |img| *sink.borrow_mut() = Some(img))
        .on_clear(|| info!("pad cleared"));

    let (w, h) = (config.width as usize, config.height as usize);
    let mut drawer = Drawer::new("Signature Pad", w, h)?;

    let hint = config.hint_text.to_ascii_uppercase();
    let hint_color = config.hint_color.to_u32();
    let mut status = String::from("DRAW WITH LMB | ENTER: DONE  C: CLEAR  ESC: QUIT");
    let mut pen_down = false;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Pointer -> segments.
           Visual: ink appears along the path you drag. */
        pen_down = feed_pointer(&mut pad, pen_down, drawer.left_mouse_down(), drawer.mouse_pos());

        /* 2) Actions */
        if drawer.c_pressed_once() {
            pad.handle_action(SignatureAction::Clear);
            status = String::from("CLEARED");
        }
        if drawer.enter_pressed_once() {
            pad.handle_action(SignatureAction::Complete);
        }
        if let Some(result) = completed.borrow_mut().take() {
            status = match result {
                Some(image) => match image.save_png(&cli.out) {
                    Ok(()) => {
                        info!(path = %cli.out.display(), "signature saved");
                        format!("SAVED {}", cli.out.display())
                    }
                    Err(e) => {
                        warn!("{e}");
                        String::from("SAVE FAILED")
                    }
                },
                None => {
                    info!("signature is empty");
                    String::from("SIGNATURE IS EMPTY")
                }
            };
        }

        /* 3) Pad image (only re-rasterized when strokes changed). */
        let mut screen = pad.preview().to_frame_buffer(config.pad_color);

        /* 4) Overlays: hint, status, crosshair. */
        if pad.hint_visible() {
            draw_text_centered(&mut screen, &hint, hint_color);
        }
        draw_text_5x7(&mut screen, 4, h as i32 - 11, &status, 0x00_66_66_66);
        if let Some(p) = drawer.mouse_pos() {
            draw_crosshair(&mut screen, p.x as i32, p.y as i32, 8, 0x00_FF_66_00);
        }

        /* 5) Present. */
        drawer.present(&screen)?;
    }

    /* --- Persist strokes for next time --- */
    if let Some(path) = &cli.state {
        fs::write(path, pad.state().to_json()?)?;
        info!(path = %path.display(), segments = pad.state().len(), "saved strokes");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_without_position_starts_on_first_known_position() {
        let mut pad = SignaturePad::new(PadConfig::default());
        let mut pen = feed_pointer(&mut pad, false, true, None);
        assert!(!pen);
        pen = feed_pointer(&mut pad, pen, true, Some(Point::new(10.0, 10.0)));
        assert!(pen);
        pen = feed_pointer(&mut pad, pen, true, Some(Point::new(20.0, 15.0)));
        pen = feed_pointer(&mut pad, pen, false, Some(Point::new(20.0, 15.0)));
        assert!(!pen);
        assert_eq!(pad.state().len(), 1);
    }

    #[test]
    fn cursor_leaving_mid_stroke_keeps_the_stroke() {
        let mut pad = SignaturePad::new(PadConfig::default());
        let mut pen = feed_pointer(&mut pad, false, true, Some(Point::new(0.0, 0.0)));
        pen = feed_pointer(&mut pad, pen, true, None);
        assert!(pen);
        feed_pointer(&mut pad, pen, true, Some(Point::new(5.0, 5.0)));
        assert_eq!(pad.state().len(), 1);
    }
}
