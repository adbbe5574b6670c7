pub mod advising;
