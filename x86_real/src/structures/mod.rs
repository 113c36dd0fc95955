mod gdt;

pub use gdt::*;
