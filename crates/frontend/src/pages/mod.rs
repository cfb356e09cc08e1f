pub mod starmap;
