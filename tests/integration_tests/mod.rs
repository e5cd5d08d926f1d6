mod auth;
mod capabilities;
#[cfg(not(feature = "acceptance-tests"))]
mod transfers;
#[cfg(not(feature = "acceptance-tests"))]
mod validation;
