mod document;
mod json;
