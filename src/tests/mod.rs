mod aggregator_test;
mod lookup_test;
