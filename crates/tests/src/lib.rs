#[cfg(test)]
mod common;

#[cfg(test)]
mod catalog_tests;

#[cfg(test)]
mod submission_create_tests;

#[cfg(test)]
mod submission_update_tests;

#[cfg(test)]
mod submission_failure_tests;
