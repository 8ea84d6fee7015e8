pub mod error;
pub mod flow;
pub mod model;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use error::{FlowError, Result};
pub use flow::IntakeFlow;
pub use model::{AssessmentRequest, AssessmentResult, ContactInfo, QuestionnaireAnswers, Zone};
pub use session::{InMemorySessionStorage, Session, SessionStorage};
pub use state::IntakeState;
