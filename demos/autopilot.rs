use etch_a_sketch::{logging, Axis, EtchASketch, SketchCommand, SketchConfig};
use rand::Rng;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(false);

    let config = SketchConfig::builder()
        .title("Etch A Sketch - autopilot".to_string())
        .surface_width(400)
        .build();

    let sketch = EtchASketch::new(config)?;

    // Create a channel for sending scripted knob turns
    let (sender, receiver) = mpsc::channel();

    // Random walk: pick a knob and a direction, hold it for a while, repeat
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            if rng.random_bool(0.02) {
                if sender.send(SketchCommand::Shake).is_err() {
                    break;
                }
                thread::sleep(Duration::from_millis(500));
                continue;
            }

            let axis = if rng.random_bool(0.5) {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            let amount = if rng.random_bool(0.5) { 2.0 } else { -2.0 };
            let run = rng.random_range(5..40);

            for _ in 0..run {
                if sender.send(SketchCommand::Nudge(axis, amount)).is_err() {
                    return;
                }
                thread::sleep(Duration::from_millis(8));
            }
        }
    });

    println!("Drawing a random walk with both knobs.");
    println!("Drag the frame and let go to shake it clean. Close the window to exit.");

    sketch.show_with_commands(receiver)?;
    Ok(())
}
