use criterion::*;
use finite_automata::{prelude::*, random};

static SIZES: [usize; 3] = [4, 8, 12];

fn determinize(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinize");
    group.sample_size(20);

    for size in SIZES {
        let nfa = random::random_nfa(2, size, 0.2, 0.05, 0.3);
        group.bench_with_input(BenchmarkId::from_parameter(size), &nfa, |b, nfa| {
            b.iter(|| nfa.determinize());
        });
    }
    group.finish();
}

fn minimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    group.sample_size(20);

    for size in SIZES.iter().map(|n| n * 8) {
        let dfa = random::random_dfa(3, size, 0.5);
        group.bench_with_input(BenchmarkId::from_parameter(size), &dfa, |b, dfa| {
            b.iter(|| dfa.minimize());
        });
    }
    group.finish();
}

fn run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run");
    let nfa = random::random_nfa(2, 16, 0.2, 0.05, 0.3);

    for len in [16, 256] {
        let word = random::random_word(nfa.alphabet(), len, len);
        group.bench_with_input(BenchmarkId::new("set", len), &word, |b, word| {
            b.iter(|| nfa.accepts(&nfa.compute_run(word.chars())));
        });
    }
    let word = random::random_word(nfa.alphabet(), 8, 8);
    group.bench_with_input(BenchmarkId::new("tree", 8), &word, |b, word| {
        b.iter(|| nfa.accepts_run_tree(&nfa.compute_run_tree(word.chars())));
    });
    group.finish();
}

criterion_group!(benches, determinize, minimize, run);
criterion_main!(benches);
