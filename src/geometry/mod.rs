mod circle_arc;
mod torus;

pub use circle_arc::CircleArc;
pub use torus::Torus;
