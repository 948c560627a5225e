// One render module per wizard page.

pub mod data_input;
pub mod position_select;
pub mod recommendations;
pub mod result;
pub mod welcome;
