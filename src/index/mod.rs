pub mod btree_index;
