pub mod chargesites;
