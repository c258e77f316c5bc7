#![no_main]
use libfuzzer_sys::fuzz_target;

use cordyceps_avl::model::{run_reference_equivalence, Op};

fuzz_target!(|ops: Vec<Op>| { run_reference_equivalence(ops) });
