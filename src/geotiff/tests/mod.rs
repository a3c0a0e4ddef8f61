#[cfg(test)]
mod decoder_tests;
#[cfg(test)]
mod citation_tests;
