use std::{env, process};

use anyhow::{anyhow, Context, Result};

use evm_abi::Abi;

/// Interface of the price oracle contract this tool targets, as emitted by
/// the Solidity compiler.
const ORACLE_ABI: &str = r#"[
    {
        "inputs": [],
        "stateMutability": "nonpayable",
        "type": "constructor"
    },
    {
        "anonymous": false,
        "inputs": [
            {
                "indexed": false,
                "internalType": "uint256",
                "name": "newPrice",
                "type": "uint256"
            }
        ],
        "name": "PriceUpdated",
        "type": "event"
    },
    {
        "inputs": [],
        "name": "owner",
        "outputs": [
            {
                "internalType": "address",
                "name": "",
                "type": "address"
            }
        ],
        "stateMutability": "view",
        "type": "function"
    },
    {
        "inputs": [],
        "name": "price",
        "outputs": [
            {
                "internalType": "uint256",
                "name": "",
                "type": "uint256"
            }
        ],
        "stateMutability": "view",
        "type": "function"
    },
    {
        "inputs": [
            {
                "internalType": "uint256",
                "name": "newPrice",
                "type": "uint256"
            }
        ],
        "name": "updatePrice",
        "outputs": [],
        "stateMutability": "nonpayable",
        "type": "function"
    }
]"#;

fn encode_call(function_name: &str, json_args: &str) -> Result<String> {
    let abi: Abi = serde_json::from_str(ORACLE_ABI).context("embedded ABI is invalid")?;

    let calldata = abi.encode_input_from_json(function_name, json_args)?;

    Ok(format!("0x{}", hex::encode(calldata)))
}

fn run() -> Result<String> {
    let mut args = env::args().skip(1);

    let function_name = args
        .next()
        .ok_or_else(|| anyhow!("usage: encode-call <functionName> <jsonEncodedArgsArray>"))?;
    let json_args = args
        .next()
        .ok_or_else(|| anyhow!("usage: encode-call <functionName> <jsonEncodedArgsArray>"))?;

    encode_call(&function_name, &json_args)
}

fn main() {
    match run() {
        Ok(calldata) => println!("{}", calldata),
        Err(err) => {
            eprintln!("Error encoding function call: {:#}", err);
            process::exit(1);
        }
    }
}
