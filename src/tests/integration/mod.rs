//! Integration tests against a local wiremock server.

mod http_client_tests;
