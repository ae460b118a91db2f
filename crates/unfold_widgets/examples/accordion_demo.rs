//! Headless Accordion Demo
//!
//! Drives an accordion through a few toggles at 60fps and prints the height
//! of every section as the transitions run.
//!
//! Run with: cargo run -p unfold_widgets --example accordion_demo
//! Set RUST_LOG=unfold_widgets=debug to see transition logs.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use unfold_widgets::prelude::*;

const FRAME_MS: f32 = 1000.0 / 60.0;

struct Faq {
    question: &'static str,
    answer: &'static str,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let sections = vec![
        Faq {
            question: "What is Unfold?",
            answer: "A pair of animated container widgets.\nCollapsible and Accordion.",
        },
        Faq {
            question: "How do sections open?",
            answer: "Tap a header. Only one section stays open.",
        },
        Faq {
            question: "Can I change the curve?",
            answer: "Any easing name works:\neaseInOutQuad, easeOutBounce, linear...\nor pass a function.",
        },
    ];

    let config = AccordionConfig::from_toml_str(
        r#"
        align = "center"
        duration = 250
        easing = "easeInOutCubic"
        "#,
    )?;

    let scheduler = SchedulerHandle::new();
    let mut faq = accordion(scheduler.clone(), sections)
        .config(config)
        .header(|faq, _, active| text(format!("{} {}", if active { "-" } else { "+" }, faq.question)))
        .content(|faq, _, _| text(faq.answer))
        .on_change(|active| println!("active section -> {active:?}"))
        .build()?;

    // First layout pass measures every body
    let report = compute_layout(&faq.render())?;
    faq.apply_layout(&report);

    for index in [0, 2, 2] {
        faq.press(index)?;
        while scheduler.has_active_animations() {
            scheduler.tick(FRAME_MS);
            print_frame(&faq, scheduler.elapsed_ms())?;
        }
    }

    Ok(())
}

fn print_frame(faq: &Accordion<Faq>, elapsed_ms: f64) -> Result<()> {
    let heights: Vec<String> = (0..faq.sections().len())
        .filter_map(|k| faq.collapsible(k))
        .map(|c| format!("{:6.1}", c.height()))
        .collect();
    let total = compute_layout(&faq.render())?.root_height;
    println!("{elapsed_ms:8.1}ms  [{}]  total {total:6.1}", heights.join(" "));
    Ok(())
}
