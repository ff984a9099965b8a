//! Rotation demo: a host driver in miniature.
//!
//! Registers an uptime job and two apps on a 64x8 surface, then runs the
//! frame loop for a few seconds, printing the surface as ASCII. With the
//! default row pitch of 8 the wipe travels the full height of this
//! display, so each handoff slides the incoming app in from below.

use carousel::{App, Job, JobError, JobValue, Rgb, Scheduler, Surface};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Reports whole seconds since the demo started.
struct UptimeJob {
    started: Instant,
}

impl Job for UptimeJob {
    fn run(&self) -> Result<JobValue, JobError> {
        Ok(Arc::new(self.started.elapsed().as_secs()))
    }
}

/// A scrolling dotted banner; ignores job data.
struct BannerApp {
    color: u32,
    phase: u64,
}

impl App for BannerApp {
    fn update(&mut self, now_ms: u64, _data: Option<JobValue>) {
        self.phase = now_ms / 250;
    }

    fn draw(&self, surface: &mut Surface) {
        for y in 0..8 {
            for x in 0..64 {
                let lit = (x as u64 + y as u64 + self.phase) % 4 == 0;
                surface.set(x, y, if lit { self.color } else { 0 });
            }
        }
    }
}

/// A bar that grows with the uptime reported by the job.
struct UptimeApp {
    seconds: u64,
}

impl App for UptimeApp {
    fn update(&mut self, _now_ms: u64, data: Option<JobValue>) {
        if let Some(value) = data {
            if let Some(seconds) = value.downcast_ref::<u64>() {
                self.seconds = *seconds;
            }
        }
    }

    fn draw(&self, surface: &mut Surface) {
        let bar = (self.seconds * 4).min(64) as i32;
        for y in 2..6 {
            for x in 0..bar {
                surface.set(x, y, Rgb::new(0, 255, 128).pack());
            }
        }
    }
}

fn print_frame(surface: &mut Surface, label: &str) {
    // Read back at logical coordinates, not through the leftover pan.
    surface.set_pan(0, 0);
    println!("-- {label} --");
    for y in 0..8 {
        let row: String = (0..64)
            .map(|x| if surface.get(x, y) == 0 { '.' } else { '#' })
            .collect();
        println!("{row}");
    }
    println!();
}

fn main() {
    let started = Instant::now();
    let mut scheduler = Scheduler::new();

    scheduler
        .register_job("uptime", Arc::new(UptimeJob { started }), Duration::from_millis(500))
        .expect("fresh registry");
    scheduler
        .register_app(
            "banner",
            Box::new(BannerApp {
                color: Rgb::new(255, 80, 0).pack(),
                phase: 0,
            }),
            None,
            Some(Duration::from_secs(3)),
        )
        .expect("fresh registry");
    scheduler
        .register_app(
            "uptime-bar",
            Box::new(UptimeApp { seconds: 0 }),
            Some("uptime"),
            Some(Duration::from_secs(3)),
        )
        .expect("fresh registry");

    scheduler.start_jobs();

    let mut surface = Surface::new(64, 8);
    for _ in 0..40 {
        let now_ms = started.elapsed().as_millis() as u64;
        scheduler.update(now_ms);

        surface.clear();
        scheduler.draw(&mut surface);

        let label = format!(
            "t={now_ms}ms active={} pan={}",
            scheduler.active_app().unwrap_or("-"),
            scheduler.y_offset(),
        );
        print_frame(&mut surface, &label);

        std::thread::sleep(Duration::from_millis(250));
    }

    scheduler.stop_jobs();
    println!("stopped after {:?}", started.elapsed());
}
