//! Before/after gallery content.

use once_cell::sync::Lazy;
use serde::Serialize;

/// One testimonial card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformation {
    pub id: u32,
    pub name: &'static str,
    pub age: u32,
    pub weight_lost_kg: u32,
    pub months: u32,
    pub image_key: &'static str,
    pub quote: &'static str,
}

static TRANSFORMATIONS: Lazy<Vec<Transformation>> = Lazy::new(|| {
    vec![
        Transformation {
            id: 1,
            name: "Ana Silva",
            age: 32,
            weight_lost_kg: 15,
            months: 3,
            image_key: "transformation-1",
            quote: "I lost 15 kg and gained a lot of confidence! The plan was perfect for me.",
        },
        Transformation {
            id: 2,
            name: "Carlos Santos",
            age: 45,
            weight_lost_kg: 28,
            months: 6,
            image_key: "transformation-2",
            quote: "A complete transformation! I feel 10 years younger.",
        },
        Transformation {
            id: 3,
            name: "Mariana Costa",
            age: 28,
            weight_lost_kg: 12,
            months: 4,
            image_key: "transformation-3",
            quote: "I finally lost weight in a healthy, sustainable way!",
        },
        Transformation {
            id: 4,
            name: "Pedro Lima",
            age: 38,
            weight_lost_kg: 20,
            months: 5,
            image_key: "transformation-4",
            quote: "It changed my life! I recommend it to everyone.",
        },
    ]
});

/// The gallery, in display order.
pub fn transformations() -> &'static [Transformation] {
    &TRANSFORMATIONS
}

/// Gallery carousel position. Wraps around in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GalleryCursor {
    index: usize,
}

impl GalleryCursor {
    pub fn current(&self) -> &'static Transformation {
        let all = transformations();
        &all[self.index % all.len()]
    }

    pub fn next(&mut self) -> &'static Transformation {
        self.index = (self.index + 1) % transformations().len();
        self.current()
    }

    pub fn previous(&mut self) -> &'static Transformation {
        let len = transformations().len();
        self.index = (self.index + len - 1) % len;
        self.current()
    }
}
