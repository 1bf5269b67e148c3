pub mod allocation;
pub mod offers;
pub mod palette;

#[cfg(test)]
mod tests_props_allocation;
