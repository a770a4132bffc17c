use std::thread;
use std::time::Duration;

use dismiss_demo::DemoShell;
use swipedismiss_foundation::{ConfigError, PointerEventKind, ViewConfiguration};
use swipedismiss_ui_graphics::Point;

const DENSITY: f32 = 2.0;
const COLUMN_WIDTH: f32 = 720.0;
const CARD_HEIGHT: f32 = 144.0;
const FRAME: Duration = Duration::from_millis(16);

/// One scripted drag across a card row.
struct Swipe {
    row: usize,
    from_x: f32,
    to_x: f32,
    duration_millis: u64,
    steps: u32,
}

fn main() -> Result<(), ConfigError> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let configuration = ViewConfiguration::for_density(DENSITY)?;
    let mut shell = DemoShell::new(COLUMN_WIDTH, configuration);
    for label in ["Inbox", "Drafts", "Sent", "Spam", "Trash"] {
        shell.add_card(label, CARD_HEIGHT);
    }

    println!("=== Swipe-to-dismiss demo ===");
    println!("cards: {:?}", shell.labels());

    let script = [
        // Quick flick: short travel, fast release.
        Swipe {
            row: 0,
            from_x: 40.0,
            to_x: 200.0,
            duration_millis: 60,
            steps: 4,
        },
        // Slow nudge: snaps back.
        Swipe {
            row: 0,
            from_x: 40.0,
            to_x: 160.0,
            duration_millis: 400,
            steps: 10,
        },
        // Long drag to the left past half the width.
        Swipe {
            row: 2,
            from_x: 600.0,
            to_x: 100.0,
            duration_millis: 300,
            steps: 12,
        },
    ];

    for swipe in &script {
        perform(&mut shell, swipe);
        settle(&mut shell);
        println!("cards: {:?}", shell.labels());
    }

    println!("dismissed: {:?}", shell.dismissed());
    Ok(())
}

fn perform(shell: &mut DemoShell, swipe: &Swipe) {
    let y = swipe.row as f32 * CARD_HEIGHT + CARD_HEIGHT / 2.0;
    let step = Duration::from_millis(swipe.duration_millis / u64::from(swipe.steps));

    let now = shell.now_millis();
    shell.dispatch(PointerEventKind::Down, Point::new(swipe.from_x, y), now);
    for i in 1..=swipe.steps {
        thread::sleep(step);
        shell.update();
        let x = swipe.from_x + (swipe.to_x - swipe.from_x) * i as f32 / swipe.steps as f32;
        let now = shell.now_millis();
        shell.dispatch(PointerEventKind::Move, Point::new(x, y), now);
    }
    let now = shell.now_millis();
    shell.dispatch(PointerEventKind::Up, Point::new(swipe.to_x, y), now);
}

fn settle(shell: &mut DemoShell) {
    shell.update();
    while !shell.is_idle() {
        thread::sleep(FRAME);
        shell.update();
    }
}
