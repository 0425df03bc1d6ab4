mod aggregator_tests;
mod scheduler_tests;
