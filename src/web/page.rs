pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Food Identification and Calorie Information</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Ubuntu, sans-serif;
            background: linear-gradient(135deg, #f6d365 0%, #fda085 100%);
            min-height: 100vh;
            display: flex;
            justify-content: center;
            padding: 32px 16px;
        }

        main {
            background: #fff;
            border-radius: 16px;
            box-shadow: 0 16px 48px rgba(0, 0, 0, 0.2);
            max-width: 760px;
            width: 100%;
            padding: 36px;
            align-self: flex-start;
        }

        h1 { color: #333; font-size: 1.8em; margin-bottom: 24px; }

        .drop-zone {
            border: 3px dashed #f08a4b;
            border-radius: 12px;
            padding: 48px 16px;
            text-align: center;
            cursor: pointer;
            background: #fff8f2;
            transition: background 0.2s, border-color 0.2s;
        }

        .drop-zone:hover, .drop-zone.dragover { background: #ffeede; border-color: #d9642a; }
        .drop-title { color: #d9642a; font-size: 1.15em; font-weight: 600; margin-bottom: 6px; }
        .drop-hint { color: #999; font-size: 0.9em; }
        input[type="file"] { display: none; }

        .hidden { display: none; }

        figure { margin-top: 28px; }
        figure img { max-width: 100%; border-radius: 10px; box-shadow: 0 4px 14px rgba(0, 0, 0, 0.1); }
        figcaption { color: #777; font-size: 0.85em; margin-top: 6px; text-align: center; }

        .line { margin-top: 18px; color: #333; font-size: 1.05em; }
        .line strong { color: #d9642a; }
        .query { color: #666; font-size: 0.9em; margin-top: 6px; }

        .status { margin-top: 18px; color: #666; }

        pre {
            background: #fafafa;
            border: 1px solid #eee;
            border-radius: 8px;
            padding: 14px;
            margin-top: 10px;
            overflow-x: auto;
            font-size: 0.9em;
        }

        .error {
            background: #fee;
            border: 2px solid #fcc;
            color: #c33;
            padding: 14px;
            border-radius: 8px;
            margin-top: 18px;
            white-space: pre-wrap;
        }

        footer { margin-top: 32px; padding-top: 18px; border-top: 1px solid #eee; color: #777; font-size: 0.9em; }
    </style>
</head>
<body>
<main>
    <h1>Food Identification and Calorie Information</h1>

    <label class="drop-zone" id="dropZone">
        <div class="drop-title">Upload a food image</div>
        <div class="drop-hint">Click or drag a file here &middot; JPG, JPEG or PNG</div>
        <input type="file" id="fileInput" accept=".jpg,.jpeg,.png,image/jpeg,image/png">
    </label>

    <p class="status hidden" id="status">Identifying your food...</p>
    <div class="error hidden" id="requestError"></div>

    <section class="hidden" id="result">
        <figure>
            <img id="preview" alt="Uploaded Image">
            <figcaption>Uploaded Image</figcaption>
        </figure>
        <p class="line">Predicted Food: <strong id="label"></strong></p>
        <p class="query">Querying API with: <span id="query"></span></p>

        <div class="hidden" id="nutrition">
            <p class="line">Calorie Information:</p>
            <pre id="nutritionJson"></pre>
        </div>
        <div class="error hidden" id="nutritionError"></div>
    </section>

    <footer>Upload an image of food, and the app will identify the food and provide its calorie information.</footer>
</main>

<script>
    const ACCEPTED = ['jpg', 'jpeg', 'png'];
    const $ = (id) => document.getElementById(id);
    const show = (el, visible) => el.classList.toggle('hidden', !visible);

    const dropZone = $('dropZone');
    const fileInput = $('fileInput');

    dropZone.addEventListener('dragover', (e) => {
        e.preventDefault();
        dropZone.classList.add('dragover');
    });
    dropZone.addEventListener('dragleave', () => dropZone.classList.remove('dragover'));
    dropZone.addEventListener('drop', (e) => {
        e.preventDefault();
        dropZone.classList.remove('dragover');
        if (e.dataTransfer.files[0]) analyze(e.dataTransfer.files[0]);
    });
    fileInput.addEventListener('change', (e) => {
        if (e.target.files[0]) analyze(e.target.files[0]);
        fileInput.value = '';
    });

    function accepted(file) {
        const ext = file.name.split('.').pop().toLowerCase();
        return file.name.includes('.') && ACCEPTED.includes(ext);
    }

    function renderNutrition(nutrition) {
        const box = $('nutrition');
        const err = $('nutritionError');
        show(box, false);
        show(err, false);

        if (nutrition.status === 'found') {
            $('nutritionJson').textContent = JSON.stringify(nutrition.data, null, 2);
            show(box, true);
        } else if (nutrition.status === 'failed') {
            err.textContent = 'Error fetching calorie info: ' + nutrition.code + '\nResponse: ' + nutrition.body;
            show(err, true);
        } else {
            err.textContent = 'Error fetching calorie info: ' + nutrition.message;
            show(err, true);
        }
    }

    async function analyze(file) {
        show($('result'), false);
        show($('requestError'), false);

        if (!accepted(file)) {
            $('requestError').textContent = 'Please upload a JPG, JPEG or PNG image.';
            show($('requestError'), true);
            return;
        }

        show($('status'), true);
        const form = new FormData();
        form.append('image', file);

        try {
            const response = await fetch('/upload', { method: 'POST', body: form });
            const payload = await response.json();
            if (!response.ok) {
                throw new Error(payload.error || ('HTTP ' + response.status));
            }

            $('preview').src = payload.image;
            $('label').textContent = payload.label;
            $('query').textContent = payload.query;
            renderNutrition(payload.nutrition);
            show($('result'), true);
        } catch (error) {
            $('requestError').textContent = 'Error: ' + error.message;
            show($('requestError'), true);
        } finally {
            show($('status'), false);
        }
    }
</script>
</body>
</html>
"#;
