//! Disposable in-memory EVM for read-only calls
//!
//! The target code is installed at a fixed address next to a small forwarder
//! contract. The transaction calls the forwarder, which forwards its calldata
//! to the target with `STATICCALL` and returns (or reverts with) whatever
//! the target produced. Any state change attempted by the target therefore
//! fails the call. Gas bounds the number of interpreter steps.

use super::error::ExtractionError;
use log::debug;
use revm::{
    bytecode::Bytecode,
    context::{
        result::{ExecutionResult, Output},
        BlockEnv, Context, TxEnv,
    },
    database::{CacheDB, EmptyDB},
    primitives::{Address, Bytes, TxKind},
    state::AccountInfo,
    ExecuteEvm, MainBuilder, MainContext,
};

/// Externally owned account sending the call
pub const CALLER_ADDRESS: Address = Address::new([0x1c; 20]);

/// Address of the forwarding contract
pub const FORWARDER_ADDRESS: Address = Address::new([0x9e; 20]);

/// Address the target code is installed at
pub const TARGET_ADDRESS: Address = Address::new([0x7a; 20]);

const PUSH1: u8 = 0x60;
const PUSH20: u8 = 0x73;

/// Runtime code of the forwarder contract for `target`
///
/// ```text
/// CALLDATACOPY(0, 0, CALLDATASIZE)
/// ok := STATICCALL(GAS, target, 0, CALLDATASIZE, 0, 0)
/// RETURNDATACOPY(0, 0, RETURNDATASIZE)
/// if ok { RETURN(0, RETURNDATASIZE) } else { REVERT(0, RETURNDATASIZE) }
/// ```
pub fn forwarder_code(target: Address) -> Bytes {
    let mut code = Vec::with_capacity(54);
    // CALLDATACOPY(dest 0, offset 0, size CALLDATASIZE)
    code.extend_from_slice(&[0x36, PUSH1, 0x00, PUSH1, 0x00, 0x37]);
    // STATICCALL(gas, target, argsOffset 0, argsSize CALLDATASIZE, retOffset 0, retSize 0)
    code.extend_from_slice(&[PUSH1, 0x00, PUSH1, 0x00, 0x36, PUSH1, 0x00, PUSH20]);
    code.extend_from_slice(target.as_slice());
    code.extend_from_slice(&[0x5a, 0xfa]);
    // RETURNDATACOPY(dest 0, offset 0, size RETURNDATASIZE)
    code.extend_from_slice(&[0x3d, PUSH1, 0x00, PUSH1, 0x00, 0x3e]);
    // JUMPI(success) else REVERT(0, RETURNDATASIZE)
    code.extend_from_slice(&[PUSH1, 0x31, 0x57, 0x3d, PUSH1, 0x00, 0xfd]);
    // 0x31: JUMPDEST RETURN(0, RETURNDATASIZE)
    code.extend_from_slice(&[0x5b, 0x3d, PUSH1, 0x00, 0xf3]);
    Bytes::from(code)
}

/// Execute `calldata` against `code` as a static call and return its output
///
/// Runs on a fresh, empty in-memory database that is dropped afterwards.
pub fn static_call(code: Bytes, calldata: Bytes, gas_limit: u64) -> Result<Bytes, ExtractionError> {
    let target = Bytecode::new_raw_checked(code)
        .map_err(|e| ExtractionError::Execution(format!("unsupported bytecode: {:?}", e)))?;
    let forwarder = Bytecode::new_raw_checked(forwarder_code(TARGET_ADDRESS))
        .map_err(|e| ExtractionError::Execution(format!("forwarder bytecode: {:?}", e)))?;

    let mut db = CacheDB::<EmptyDB>::default();
    db.insert_account_info(TARGET_ADDRESS, AccountInfo::from_bytecode(target));
    db.insert_account_info(FORWARDER_ADDRESS, AccountInfo::from_bytecode(forwarder));

    let block = BlockEnv {
        gas_limit,
        ..Default::default()
    };
    let mut evm = Context::mainnet()
        .with_db(db)
        .with_block(block)
        .build_mainnet();

    let tx = TxEnv {
        caller: CALLER_ADDRESS,
        kind: TxKind::Call(FORWARDER_ADDRESS),
        data: calldata,
        gas_limit,
        ..Default::default()
    };

    let result = evm
        .transact_one(tx)
        .map_err(|e| ExtractionError::Execution(format!("{:?}", e)))?;

    match result {
        ExecutionResult::Success {
            output, gas_used, ..
        } => {
            debug!("Static call succeeded using {} gas", gas_used);
            Ok(match output {
                Output::Call(data) => data,
                Output::Create(data, _) => data,
            })
        }
        ExecutionResult::Revert { output, .. } => Err(ExtractionError::Reverted(output.len())),
        ExecutionResult::Halt { reason, .. } => {
            Err(ExtractionError::Halted(format!("{:?}", reason)))
        }
    }
}
