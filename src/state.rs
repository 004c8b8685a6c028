use std::sync::Arc;

use crate::{
  config::SenderConfig,
  domains::registration::{
    model::RegistrationRequest,
    service::{RegistrationService, RegistrationServiceError, RegistrationServiceImpl},
  },
  email::EmailSender,
};

pub trait AppState: Clone + Send + Sync + 'static {
  fn register(
    &self,
    req: RegistrationRequest,
  ) -> impl std::future::Future<Output = Result<(), RegistrationServiceError>> + Send;
}

#[derive(Clone)]
pub struct SharedAppState {
  pub registration_service: Arc<RegistrationServiceImpl>,
}

impl SharedAppState {
  pub fn new(sender: SenderConfig, email_sender: Arc<dyn EmailSender>) -> Self {
    let registration_service = Arc::new(RegistrationServiceImpl::new(sender, email_sender));

    Self { registration_service }
  }
}

impl AppState for SharedAppState {
  async fn register(&self, req: RegistrationRequest) -> Result<(), RegistrationServiceError> {
    self.registration_service.register(req).await
  }
}
