pub mod nucleotide;
pub mod quality;
pub mod tagged;
