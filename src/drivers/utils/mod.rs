pub mod keyboard_normalizer;

pub use keyboard_normalizer::KeyboardNormalizer;
