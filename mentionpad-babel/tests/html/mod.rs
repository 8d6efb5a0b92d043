mod export;
mod import;
mod roundtrip;
