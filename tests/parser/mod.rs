//! Parser layer tests: the C# subset completion inputs are written in.

pub mod tests_csharp_subset;
