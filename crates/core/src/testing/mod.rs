//! Mock collaborators shared by unit and integration tests.

mod mock_catalog;
mod mock_hass;
mod mock_llm;

pub use mock_catalog::MockCatalogSource;
pub use mock_hass::{MockHomeAssistant, PlayMediaCall, RecordedCall};
pub use mock_llm::MockLlmClient;
