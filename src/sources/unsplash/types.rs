//! Unsplash enumerations

use crate::types::wire_enum;

wire_enum! {
    /// Photo orientation filter
    pub enum Orientation {
        Landscape => "landscape",
        Portrait => "portrait",
        Squarish => "squarish",
    }
}

wire_enum! {
    /// Dominant color filter (search only)
    pub enum Color {
        BlackAndWhite => "black_and_white",
        Black => "black",
        White => "white",
        Yellow => "yellow",
        Orange => "orange",
        Red => "red",
        Purple => "purple",
        Magenta => "magenta",
        Green => "green",
        Teal => "teal",
        Blue => "blue",
    }
}

wire_enum! {
    /// Search result ordering
    #[derive(Default)]
    pub enum OrderBy {
        #[default]
        Relevant => "relevant",
        Latest => "latest",
    }
}

wire_enum! {
    /// Content safety level
    #[derive(Default)]
    pub enum ContentFilter {
        /// Server default; some mature content may appear
        #[default]
        Low => "low",
        /// Strict filtering
        High => "high",
    }
}
