use cosmwasm_std::{to_json_binary, Addr, Empty, Env, StdResult, Storage, WasmMsg};
use cw_multi_test::error::AnyResult;
use cw_multi_test::{App, AppResponse, Contract, Executor};
use serde::de::DeserializeOwned;

/// Common scaffolding for deploying contracts under test.
///
/// Each implementor wires its entry points into a wrapper and registers its
/// deployed address under a fixed label, so dependent contracts can resolve
/// each other during setup without threading addresses through every helper.
pub trait TestingContract<IM, EM, QM>
where
    IM: serde::Serialize,
    EM: serde::Serialize,
    QM: serde::Serialize,
{
    fn wrapper() -> Box<dyn Contract<Empty>>;

    fn default_init(app: &mut App, env: &Env) -> IM;

    fn new(app: &mut App, env: &Env, msg: Option<IM>) -> Self;

    fn addr(&self) -> &Addr;

    fn store_code(app: &mut App) -> u64 {
        app.store_code(Self::wrapper())
    }

    fn instantiate(app: &mut App, code_id: u64, label: &str, msg: &IM) -> Addr {
        let deployer = app.api().addr_make("deployer");
        let admin = app.api().addr_make("admin");
        let addr = app
            .instantiate_contract(code_id, deployer, msg, &[], label, Some(admin.to_string()))
            .unwrap();
        Self::register_addr(app, label, &addr);
        addr
    }

    /// Record the deployed address under `label` in the app storage.
    fn register_addr(app: &mut App, label: &str, addr: &Addr) {
        app.storage_mut()
            .set(Self::addr_key(label).as_bytes(), addr.as_bytes());
    }

    /// Resolve the address previously registered under `label`.
    fn registered_addr(app: &App, label: &str) -> Addr {
        let bytes = app.storage().get(Self::addr_key(label).as_bytes()).unwrap();
        Addr::unchecked(String::from_utf8(bytes).unwrap())
    }

    fn addr_key(label: &str) -> String {
        format!("testing:addr:{}", label)
    }

    fn execute(&self, app: &mut App, sender: &Addr, msg: &EM) -> AnyResult<AppResponse> {
        let wasm = WasmMsg::Execute {
            contract_addr: self.addr().to_string(),
            msg: to_json_binary(msg)?,
            funds: vec![],
        };
        app.execute(sender.clone(), wasm.into())
    }

    fn query<T: DeserializeOwned>(&self, app: &App, msg: &QM) -> StdResult<T> {
        app.wrap().query_wasm_smart(self.addr(), msg)
    }
}
