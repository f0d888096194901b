//! Dice Service - server-side `XdY` rolls

use sheetkeeper_shared::{DiceRollRequest, DiceRollResponse};

use crate::ports::outbound::{ApiError, ApiPort};

#[derive(Clone)]
pub struct DiceService<A: ApiPort> {
    api: A,
}

impl<A: ApiPort> DiceService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn roll(&self, formula: &str) -> Result<DiceRollResponse, ApiError> {
        self.api
            .post(
                "/api/dice/roll",
                &DiceRollRequest {
                    formula: formula.trim().to_string(),
                },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::application::api::Api;
    use crate::ports::outbound::MockRawApiPort;

    #[tokio::test]
    async fn trims_the_formula() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| path == "/api/dice/roll" && body == &json!({"formula": "3d6"}))
            .times(1)
            .returning(|_, _| Ok(json!({"rolls": [1, 2, 3], "total": 6})));

        let service = DiceService::new(Api::new(Arc::new(raw)));
        let result = service.roll(" 3d6 ").await.expect("roll");
        assert_eq!(result.rolls, vec![1, 2, 3]);
        assert_eq!(result.total, 6);
    }
}
