mod model_test;
