use proptest::prelude::*;

use retequiv::bytecode::{
    ClassTree, Constant, Instruction, InvokeKind, Location, MethodCall, MethodTree, Opcode,
};
use retequiv::filter::{
    BoxedTrueReturnFilter, CompoundInterceptor, EmptyObjectReturnFilter, MutationInterceptor,
    NullReturnFilter, PrimitiveReturnFilter,
};
use retequiv::mutation::{MutationDetails, NoopMutater, ReturnMutator};

const CLASS: &str = "com/example/Generated";

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn pseudo() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        (0u32..50).prop_map(Instruction::label),
        (1u32..500).prop_map(Instruction::line),
        Just(Instruction::Frame),
    ]
}

/// Instructions that can load a return value, plus some that never do.
fn value_load() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        (-2i32..3).prop_map(Instruction::int),
        (-1i64..2).prop_map(|v| Instruction::constant(Constant::Long(v))),
        prop_oneof![Just(0.0f64), Just(-0.0), Just(1.5)]
            .prop_map(|v| Instruction::constant(Constant::Double(v))),
        Just(Instruction::null()),
        prop_oneof![Just(""), Just("x")].prop_map(Instruction::string),
        prop_oneof![
            (0u16..4).prop_map(|slot| Instruction::var(Opcode::ILoad, slot)),
            Just(Instruction::op(Opcode::IRem)),
            (0u16..4).prop_map(|slot| Instruction::Iinc { slot, increment: 1 }),
            Just(Instruction::Jump {
                opcode: Opcode::IfICmpGe,
                label: 0
            }),
            Just(Instruction::Call(MethodCall::new(
                InvokeKind::Dynamic,
                "",
                "makeConcatWithConstants",
                "(I)Ljava/lang/String;"
            ))),
        ],
        Just(Instruction::invoke_static(
            "java/lang/Integer",
            "valueOf",
            "(I)Ljava/lang/Integer;"
        )),
        Just(Instruction::invoke_static(
            "java/lang/Boolean",
            "valueOf",
            "(Z)Ljava/lang/Boolean;"
        )),
        Just(Instruction::invoke_static(
            "java/util/Collections",
            "emptyList",
            "()Ljava/util/List;"
        )),
        Just(Instruction::invoke_static(
            "java/util/List",
            "of",
            "(Ljava/lang/Object;)Ljava/util/List;"
        )),
    ]
}

/// A method body: a few value loads followed by a return.
fn body() -> impl Strategy<Value = Vec<Instruction>> {
    (prop::collection::vec(value_load(), 1..5), any::<bool>()).prop_map(|(mut loads, reference)| {
        loads.push(Instruction::op(if reference {
            Opcode::AReturn
        } else {
            Opcode::IReturn
        }));
        loads
    })
}

fn mutator_id() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(ReturnMutator::ALL.to_vec()).prop_map(|m| m.id().to_string()),
        prop::sample::select(vec!["MATH", "NEGATE_CONDITIONALS", "VOID_METHOD_CALLS"])
            .prop_map(str::to_string),
    ]
}

/// A class with up to four methods, and candidates on each method's return.
fn unit() -> impl Strategy<Value = (ClassTree, Vec<MutationDetails>)> {
    prop::collection::vec((body(), prop::collection::vec(mutator_id(), 0..4)), 1..5).prop_map(
        |methods| {
            let mut trees = Vec::new();
            let mut mutations = Vec::new();
            for (i, (body, mutators)) in methods.into_iter().enumerate() {
                let location = Location::new(CLASS, format!("m{i}"), "()Ljava/lang/Object;");
                let ret = body.len() - 1;
                for mutator in mutators {
                    mutations.push(MutationDetails::new(location.clone(), mutator, ret, ""));
                }
                trees.push(MethodTree::new(location, body));
            }
            (ClassTree::new(CLASS, trees), mutations)
        },
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn filters() -> Vec<Box<dyn MutationInterceptor>> {
    vec![
        Box::new(PrimitiveReturnFilter),
        Box::new(EmptyObjectReturnFilter::new()),
        Box::new(NullReturnFilter),
        Box::new(BoxedTrueReturnFilter),
    ]
}

fn run(
    interceptor: &dyn MutationInterceptor,
    class: &ClassTree,
    mutations: Vec<MutationDetails>,
) -> Vec<MutationDetails> {
    let scope = interceptor.begin(class);
    let kept = interceptor
        .intercept(&scope, mutations, &NoopMutater)
        .expect("well-formed unit");
    interceptor.end(scope);
    kept
}

/// Insert `pseudo[i]` before instruction `i` of every method, shifting
/// candidate indices to match.
fn interleave(
    class: &ClassTree,
    mutations: &[MutationDetails],
    pseudo: &[Vec<Instruction>],
) -> (ClassTree, Vec<MutationDetails>) {
    let mut shifted = mutations.to_vec();
    let methods = class
        .methods()
        .iter()
        .map(|method| {
            let mut body = Vec::new();
            let mut new_index = Vec::new();
            for (i, insn) in method.instructions().iter().enumerate() {
                body.extend(pseudo.get(i).cloned().unwrap_or_default());
                new_index.push(body.len());
                body.push(insn.clone());
            }
            for m in shifted.iter_mut().filter(|m| m.location == method.location) {
                m.instruction_index = new_index[m.instruction_index];
            }
            MethodTree::new(method.location.clone(), body)
        })
        .collect();
    (ClassTree::new(class.name.clone(), methods), shifted)
}

fn keys(mutations: &[MutationDetails]) -> Vec<(String, String)> {
    mutations
        .iter()
        .map(|m| (m.location.method_name.clone(), m.mutator.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Filter properties
// ---------------------------------------------------------------------------

proptest! {
    /// The result does not depend on the order the four filters run in.
    #[test]
    fn classifier_order_is_irrelevant(
        (class, mutations) in unit(),
        order in Just((0..4).collect::<Vec<usize>>()).prop_shuffle(),
    ) {
        let expected = run(&CompoundInterceptor::new(filters()), &class, mutations.clone());

        let mut pool: Vec<Option<Box<dyn MutationInterceptor>>> =
            filters().into_iter().map(Some).collect();
        let shuffled = order
            .iter()
            .map(|&i| pool[i].take().expect("each filter once"))
            .collect();
        let actual = run(&CompoundInterceptor::new(shuffled), &class, mutations);

        prop_assert_eq!(actual, expected);
    }

    /// Filtering twice gives the same answer, and a second pass removes nothing.
    #[test]
    fn filtering_is_deterministic_and_idempotent((class, mutations) in unit()) {
        let chain = CompoundInterceptor::new(filters());
        let first = run(&chain, &class, mutations.clone());
        let second = run(&chain, &class, mutations);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(run(&chain, &class, first.clone()), first);
    }

    /// Candidates from other mutators always survive, and kept candidates
    /// stay in their original order.
    #[test]
    fn unrelated_mutators_pass_through((class, mutations) in unit()) {
        let kept = run(&CompoundInterceptor::new(filters()), &class, mutations.clone());

        let unrelated: Vec<_> = mutations
            .iter()
            .filter(|m| m.return_mutator().is_none())
            .cloned()
            .collect();
        let kept_unrelated: Vec<_> = kept
            .iter()
            .filter(|m| m.return_mutator().is_none())
            .cloned()
            .collect();
        prop_assert_eq!(kept_unrelated, unrelated);

        let mut remaining = mutations.iter();
        for m in &kept {
            prop_assert!(remaining.any(|candidate| candidate == m));
        }
    }

    /// Labels, line numbers and frames never change a verdict.
    #[test]
    fn pseudo_instructions_are_transparent(
        (class, mutations) in unit(),
        pseudo in prop::collection::vec(prop::collection::vec(pseudo(), 0..3), 6),
    ) {
        let chain = CompoundInterceptor::new(filters());
        let plain = run(&chain, &class, mutations.clone());

        let (noisy_class, noisy_mutations) = interleave(&class, &mutations, &pseudo);
        let noisy = run(&chain, &noisy_class, noisy_mutations);

        prop_assert_eq!(keys(&noisy), keys(&plain));
    }
}

// ---------------------------------------------------------------------------
// Deterministic checks
// ---------------------------------------------------------------------------

#[test]
fn every_targeted_mutator_has_a_filtered_idiom() {
    let location = Location::new(CLASS, "m", "()I");
    let cases = [
        (ReturnMutator::PrimitiveReturns, Instruction::int(0)),
        (ReturnMutator::FalseReturns, Instruction::int(0)),
        (ReturnMutator::TrueReturns, Instruction::int(1)),
        (ReturnMutator::NullReturns, Instruction::null()),
        (ReturnMutator::EmptyReturns, Instruction::string("")),
    ];
    for (mutator, load) in cases {
        let class = ClassTree::new(
            CLASS,
            vec![MethodTree::new(
                location.clone(),
                vec![load, Instruction::op(Opcode::AReturn)],
            )],
        );
        let kept = run(
            &CompoundInterceptor::new(filters()),
            &class,
            vec![MutationDetails::new(location.clone(), mutator.id(), 1, "")],
        );
        assert!(kept.is_empty(), "{mutator} should be filtered");
    }
}
