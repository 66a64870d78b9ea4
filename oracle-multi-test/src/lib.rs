#![cfg(not(target_arch = "wasm32"))]
// Only exposed on unit and integration testing, not compiled to Wasm.

use cosmwasm_std::{Env, Uint128};
use cw20::MinterResponse;
use cw_multi_test::App;
pub use oracle_callback_mock::testing::CallbackMockContract;
pub use oracle_core::testing::OracleContract;
pub use oracle_library::testing::{Cw20TokenContract, TestingContract};

pub struct OracleMultiTest {
    pub cw20_token: Cw20TokenContract,
    pub oracle: OracleContract,
    pub callback_receiver: CallbackMockContract,
}

pub struct OracleMultiTestBuilder {
    app: App,
    env: Env,
}

/// [OracleMultiTest] provides a convenient way to bootstrap all the necessary contracts
/// for testing against the Private Oracle.
impl OracleMultiTestBuilder {
    /// Creates a new instance of [OracleMultiTestBuilder] with the given [App] and [Env].
    pub fn new(app: App, env: Env) -> Self {
        Self { app, env }
    }

    /// Builds the [OracleMultiTest] instance.
    /// It initializes the [Cw20TokenContract] payment token, the [OracleContract] bound
    /// to it, and a [CallbackMockContract] to receive answer callbacks.
    pub fn build(mut self) -> OracleMultiTest {
        let minter = self.app.api().addr_make("minter");
        let cw20_token = Self::deploy_cw20_token(&mut self.app, &self.env, "ORC", minter);

        let oracle = Self::deploy_oracle(
            &mut self.app,
            &self.env,
            cw20_token.addr.to_string(),
            Uint128::new(1000),
        );
        let callback_receiver = CallbackMockContract::new(&mut self.app, &self.env, None);

        OracleMultiTest {
            cw20_token,
            oracle,
            callback_receiver,
        }
    }

    /// Deploys a new [OracleContract] bound to the given payment token and fee.
    pub fn deploy_oracle(
        app: &mut App,
        env: &Env,
        payment_token: impl Into<String>,
        fee: Uint128,
    ) -> OracleContract {
        let init_msg = oracle_core::msg::InstantiateMsg {
            payment_token: payment_token.into(),
            fee,
        };

        OracleContract::new(app, env, Some(init_msg))
    }

    /// Deploys a new [Cw20TokenContract] with the given symbol and minter address.
    pub fn deploy_cw20_token(
        app: &mut App,
        env: &Env,
        symbol: impl Into<String>,
        minter: impl Into<String>,
    ) -> Cw20TokenContract {
        let symbol = symbol.into();
        let init_msg = cw20_base::msg::InstantiateMsg {
            symbol: symbol.clone(),
            name: format!("Token {}", symbol),
            decimals: 6,
            initial_balances: vec![],
            mint: Some(MinterResponse {
                minter: minter.into(),
                cap: None,
            }),
            marketing: None,
        };

        Cw20TokenContract::new(app, env, Some(init_msg))
    }
}
