mod detect;
mod normalize;
