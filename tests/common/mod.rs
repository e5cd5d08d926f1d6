#[cfg(not(feature = "acceptance-tests"))]
mod mock_server;
pub mod test_context;
