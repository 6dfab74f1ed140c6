//! Draw payload encoding.
//!
//! The canvas contract takes a draw as three parallel arrays (x coordinates,
//! y coordinates, colors) plus the canvas object being drawn to. Encoding is
//! a pure structural projection of a [`PixelSet`]; the three arrays always
//! have the same length as the set.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::grid::PixelSet;

/// Entry function invoked for every draw.
pub const DRAW_FUNCTION: &str =
    "0x915efe6647e0440f927d46e39bcb5eb040a7e567e1756e002073bc6e26f2cd23::canvas_token::draw";

/// The shared canvas object all accounts draw on.
pub const CANVAS_OBJECT_ID: &str =
    "0x5d45bb2a6f391440ba10444c7734559bd5ef9053930e3ef53d05be332518522b";

/// A pixel set projected into the contract's parallel-array form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPayload {
    pub canvas_id: String,
    pub xs: Vec<u16>,
    pub ys: Vec<u16>,
    pub colors: Vec<u8>,
}

impl DrawPayload {
    /// Project a pixel set into parallel arrays, preserving point order.
    pub fn encode(pixels: &PixelSet, canvas_id: &str) -> Self {
        let mut xs = Vec::with_capacity(pixels.len());
        let mut ys = Vec::with_capacity(pixels.len());
        let mut colors = Vec::with_capacity(pixels.len());

        for pixel in pixels.iter() {
            xs.push(pixel.point.x);
            ys.push(pixel.point.y);
            colors.push(pixel.color);
        }

        Self {
            canvas_id: canvas_id.to_string(),
            xs,
            ys,
            colors,
        }
    }

    /// Number of pixels in the payload.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Render as the entry-function call the ledger expects.
    pub fn entry_function(&self) -> EntryFunctionCall {
        EntryFunctionCall {
            function: DRAW_FUNCTION.to_string(),
            type_arguments: Vec::new(),
            arguments: json!([self.canvas_id, self.xs, self.ys, self.colors]),
        }
    }
}

/// A typed entry-function invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFunctionCall {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Value,
}
