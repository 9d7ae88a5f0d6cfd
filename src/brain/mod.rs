pub mod index_tuner;
