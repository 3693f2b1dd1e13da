pub mod count_voting;
