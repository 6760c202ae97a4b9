use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gradnet::neural::{Hyperparams, Net};

fn xor_samples() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    (
        vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ],
        vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
    )
}

fn train_cycles(net: &mut Net, inputs: &[Vec<f64>], targets: &[Vec<f64>], cycles: usize) {
    for _ in 0..cycles {
        for (input, target) in inputs.iter().zip(targets) {
            net.forward(input).unwrap();
            net.backpropagate(target).unwrap();
        }
    }
}

fn bench_forward(c: &mut Criterion) {
    let mut small = Net::from_seed(&[2, 10, 2], Hyperparams::default(), 1).unwrap();
    let mut medium = Net::from_seed(&[2, 20, 20, 20, 2], Hyperparams::default(), 2).unwrap();

    let input = [0.5, -0.5];

    c.bench_function("forward small", |b| {
        b.iter(|| small.forward(black_box(&input)).unwrap())
    });
    c.bench_function("forward medium", |b| {
        b.iter(|| medium.forward(black_box(&input)).unwrap())
    });
}

fn bench_train(c: &mut Criterion) {
    let (inputs, targets) = xor_samples();

    c.bench_function("train tiny 10 cycles", |b| {
        b.iter(|| {
            let mut net = Net::from_seed(&[2, 2, 1], Hyperparams::default(), 3).unwrap();
            train_cycles(&mut net, &inputs, &targets, black_box(10));
        })
    });
    c.bench_function("train small 100 cycles", |b| {
        b.iter(|| {
            let mut net = Net::from_seed(&[2, 10, 10, 1], Hyperparams::default(), 4).unwrap();
            train_cycles(&mut net, &inputs, &targets, black_box(100));
        })
    });
}

criterion_group!(benches, bench_forward, bench_train);
criterion_main!(benches);
